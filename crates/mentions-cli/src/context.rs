//! Loading the engine config and user directory shared by every command.

use mentions_core::config::{self, EngineConfig};
use mentions_core::error::Result;
use mentions_core::{StaticDirectory, TaggedUsers, UserDirectory, UserId};
use std::path::Path;

pub struct Context {
    pub config: EngineConfig,
    pub directory: StaticDirectory,
}

/// Resolve config and directory.
///
/// An explicit `--config` must exist; otherwise `mentions.toml` in
/// `working_dir` is used when present. Without `--directory` the demo
/// directory is used.
pub fn load_context(
    working_dir: &Path,
    config_path: Option<&Path>,
    directory_path: Option<&Path>,
) -> Result<Context> {
    let config = match config_path {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(working_dir)?,
    };

    let directory = match directory_path {
        Some(path) => StaticDirectory::load(path)?,
        None => StaticDirectory::demo(),
    };

    tracing::debug!(users = directory.len(), "context loaded");
    Ok(Context { config, directory })
}

impl Context {
    /// Look up each id in the directory, returning the ids that are unknown.
    pub fn resolve_tags(&self, ids: &[u64]) -> std::result::Result<TaggedUsers, Vec<u64>> {
        let mut tags = TaggedUsers::new();
        let mut missing = Vec::new();
        for &id in ids {
            match self.directory.find(UserId(id)) {
                Some(user) => {
                    tags.insert(user.clone());
                }
                None => missing.push(id),
            }
        }
        if missing.is_empty() {
            Ok(tags)
        } else {
            Err(missing)
        }
    }
}

//! The user directory the engine matches against.
//!
//! The engine only ever reads a directory. [`StaticDirectory`] is the
//! in-memory implementation used by the CLI and tests; any other source can
//! implement [`UserDirectory`].

use crate::error::{MentionError, Result};
use crate::matcher::find_candidates;
use crate::model::{User, UserId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub trait UserDirectory {
    /// Every user, in display order. Assumed static for a session.
    fn list_users(&self) -> &[User];

    fn find(&self, user_id: UserId) -> Option<&User> {
        self.list_users().iter().find(|u| u.user_id == user_id)
    }

    fn candidates(&self, query: &str) -> Vec<User> {
        find_candidates(self.list_users(), query)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDirectory {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    users: Vec<User>,
}

impl StaticDirectory {
    /// Build a directory, rejecting duplicate ids and blank names.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::DuplicateUserId`] or [`MentionError::EmptyUserName`].
    pub fn new(users: Vec<User>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if user.name.trim().is_empty() {
                return Err(MentionError::EmptyUserName(user.user_id.0));
            }
            if !seen.insert(user.user_id) {
                return Err(MentionError::DuplicateUserId(user.user_id.0));
            }
        }
        Ok(Self { users })
    }

    /// The four-user directory the demo comment log refers to.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            users: vec![
                User::new(1, "Kevin"),
                User::new(2, "Jeff"),
                User::new(3, "Bryan"),
                User::new(4, "Gabbey"),
            ],
        }
    }

    /// Load a directory from a `.toml` (`[[users]]` tables) or `.json` (array) file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// fails to parse, or contains invalid users.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MentionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let users = match extension.as_deref() {
            Some("toml") => toml::from_str::<DirectoryFile>(&content)
                .map(|file| file.users)
                .map_err(|e| MentionError::Directory {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?,
            Some("json") => serde_json::from_str::<Vec<User>>(&content).map_err(|e| {
                MentionError::Directory {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?,
            _ => return Err(MentionError::UnknownFormat(path.to_path_buf())),
        };

        let directory = Self::new(users)?;
        tracing::debug!(
            path = %path.display(),
            users = directory.users.len(),
            "loaded user directory"
        );
        Ok(directory)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for StaticDirectory {
    fn list_users(&self) -> &[User] {
        &self.users
    }
}

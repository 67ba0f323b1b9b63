use crate::error::{MentionError, Result};
use crate::model::UserId;
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "mentions.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_emphasis_open")]
    pub emphasis_open: String,
    #[serde(default = "default_emphasis_close")]
    pub emphasis_close: String,
    #[serde(default = "default_true")]
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            emphasis_open: default_emphasis_open(),
            emphasis_close: default_emphasis_close(),
            escape_html: default_true(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            emphasis_open: self.emphasis_open.clone(),
            emphasis_close: self.emphasis_close.clone(),
            escape_html: self.escape_html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_notify_header")]
    pub header: String,
    /// How long the display adapter should keep a notification visible.
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            header: default_notify_header(),
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub author_id: UserId,
}

/// Load `mentions.toml` from `root`, or defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<EngineConfig> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    load_config_file(&path)
}

/// Load an explicit config file. Unlike [`load_config`], a missing file is an error.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| MentionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str::<EngineConfig>(&content).map_err(|source| {
        MentionError::Config {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), "loaded engine config");
    Ok(config)
}

const fn default_true() -> bool {
    true
}

fn default_emphasis_open() -> String {
    "<b>".to_string()
}

fn default_emphasis_close() -> String {
    "</b>".to_string()
}

fn default_notify_header() -> String {
    "Sending alerts to:".to_string()
}

const fn default_dismiss_after_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let cfg = load_config(dir.path()).expect("load should succeed");
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.render.emphasis_open, "<b>");
        assert_eq!(cfg.render.emphasis_close, "</b>");
        assert!(cfg.render.escape_html);
        assert_eq!(cfg.notify.header, "Sending alerts to:");
        assert_eq!(cfg.notify.dismiss_after_ms, 2000);
        assert_eq!(cfg.session.author_id, UserId(0));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[render]\nemphasis_open = \"<strong>\"\nemphasis_close = \"</strong>\"\n\n[session]\nauthor_id = 3\n",
        )
        .expect("write config");

        let cfg = load_config(dir.path()).expect("load should succeed");
        assert_eq!(cfg.render.emphasis_open, "<strong>");
        assert!(cfg.render.escape_html);
        assert_eq!(cfg.notify.dismiss_after_ms, 2000);
        assert_eq!(cfg.session.author_id, UserId(3));
    }

    #[test]
    fn render_options_follow_config() {
        let cfg = RenderConfig {
            emphasis_open: "[".to_string(),
            emphasis_close: "]".to_string(),
            escape_html: false,
        };
        let options = cfg.options();
        assert_eq!(options.emphasis_open, "[");
        assert_eq!(options.emphasis_close, "]");
        assert!(!options.escape_html);
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[render\n").expect("write config");

        let err = load_config(dir.path()).expect_err("parse should fail");
        assert_eq!(err.error_code(), ErrorCode::ConfigParseError);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let err = load_config_file(&dir.path().join("nope.toml")).expect_err("must fail");
        assert_eq!(err.error_code(), ErrorCode::Io);
    }
}

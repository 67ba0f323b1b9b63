use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DirectoryParseError,
    DuplicateUserId,
    EmptyUserName,
    UnknownFileFormat,
    ScriptParseError,
    Io,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::DirectoryParseError => "E1002",
            Self::UnknownFileFormat => "E1003",
            Self::DuplicateUserId => "E2001",
            Self::EmptyUserName => "E2002",
            Self::ScriptParseError => "E3001",
            Self::Io => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DirectoryParseError => "User directory parse error",
            Self::UnknownFileFormat => "Unsupported file format",
            Self::DuplicateUserId => "Duplicate user id",
            Self::EmptyUserName => "Empty user name",
            Self::ScriptParseError => "Event script parse error",
            Self::Io => "I/O error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in mentions.toml and retry."),
            Self::DirectoryParseError => {
                Some("Use [[users]] tables in TOML or an array of users in JSON.")
            }
            Self::UnknownFileFormat => Some("Use a .toml or .json file extension."),
            Self::DuplicateUserId => Some("Give every user a distinct user_id."),
            Self::EmptyUserName => Some("Every user needs a non-empty name."),
            Self::ScriptParseError => {
                Some("Write one JSON event per line, e.g. {\"kind\":\"enter_pressed\"}.")
            }
            Self::Io => Some("Check that the path exists and is readable."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures at the fallible edges: loading configs, directories and scripts.
///
/// The tagging pipeline itself is total and never produces these.
#[derive(Debug, thiserror::Error)]
pub enum MentionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse user directory {path}: {reason}")]
    Directory { path: PathBuf, reason: String },

    #[error("unsupported file format for {0}")]
    UnknownFormat(PathBuf),

    #[error("user id {0} appears more than once")]
    DuplicateUserId(u64),

    #[error("user {0} has an empty name")]
    EmptyUserName(u64),

    #[error("event script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl MentionError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::Io,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::Directory { .. } => ErrorCode::DirectoryParseError,
            Self::UnknownFormat(_) => ErrorCode::UnknownFileFormat,
            Self::DuplicateUserId(_) => ErrorCode::DuplicateUserId,
            Self::EmptyUserName(_) => ErrorCode::EmptyUserName,
            Self::Script { .. } => ErrorCode::ScriptParseError,
        }
    }

    /// Remediation text for terminal output, falling back to the code summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}

pub type Result<T> = std::result::Result<T, MentionError>;

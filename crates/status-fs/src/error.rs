//! Error types for status-fs

use std::path::PathBuf;

/// Result type for status-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in status-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config at {path} must have a JSON object at its root, found {found}")]
    ConfigFormat { path: PathBuf, found: &'static str },

    #[error("Missing required configuration keys: {}", missing.join(", "))]
    ConfigValidation { missing: Vec<String> },

    #[error("Configuration version mismatch! Expected {expected}, found {found}")]
    VersionMismatch { expected: i64, found: String },

    #[error("Configuration key '{key}' is not set")]
    MissingKey { key: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

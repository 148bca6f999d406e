//! Error types for status-core

/// Result type for status-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in status-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from status-fs
    #[error(transparent)]
    Fs(#[from] status_fs::Error),

    #[error("Invalid service name {name:?}: {reason}")]
    InvalidServiceName { name: String, reason: &'static str },

    #[error("Could not determine the home directory to resolve '{key}'")]
    HomeDirUnavailable { key: &'static str },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

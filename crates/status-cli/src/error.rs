//! Error types for status-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the invocation with a non-zero exit status
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from status-core
    #[error(transparent)]
    Core(#[from] status_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Short label for the kind of failure, shown before the message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Core(status_core::Error::InvalidServiceName { .. }) => "Invalid argument",
            Self::Core(_) => "Configuration error",
            Self::Io(_) => "I/O error",
        }
    }
}

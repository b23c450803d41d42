//! Error types for refresh-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from refresh-core
    #[error(transparent)]
    Core(#[from] refresh_core::Error),

    /// Error from refresh-fs
    #[error(transparent)]
    Fs(#[from] refresh_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },

    /// The run finished but not every folder was refreshed
    #[error("{message}")]
    Incomplete { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

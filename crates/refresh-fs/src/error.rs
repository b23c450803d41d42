//! Error types for refresh-fs

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Filesystem and manifest-format failures, each naming the path involved
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} in {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Cannot write {format} for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported manifest format '.{extension}' (expected toml, json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    #[error("Invalid folder '{fragment}': {reason}")]
    InvalidFragment { fragment: String, reason: String },

    /// Another process holds the lock on a file being written
    #[error("Could not lock {path} for writing")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_fragment(fragment: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFragment {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

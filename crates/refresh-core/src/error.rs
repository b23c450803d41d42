//! Error types for refresh-core

use std::path::PathBuf;

/// Result type for refresh-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in refresh-core operations
///
/// None of these are raised while folders are being processed; per-folder
/// filesystem failures are recorded in the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No manifest found in any searched location
    #[error("No refresh manifest found (searched: {})", display_paths(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// Project root missing or not a directory
    #[error("Project root {path} is not an existing directory: {source}")]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: refresh_fs::Error,
    },

    /// Manifest content is structurally valid but unusable
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// Filesystem error from refresh-fs
    #[error(transparent)]
    Fs(#[from] refresh_fs::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

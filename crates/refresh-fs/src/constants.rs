//! Constants and enums for refresh configuration files.

use std::path::Path;

/// File names recognised as a refresh manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileName {
    /// `refresh.toml` (preferred, written by `refresh init`)
    Toml,
    /// `refresh.json`
    Json,
    /// `refresh.yaml`
    Yaml,
    /// `refresh.yml`
    Yml,
}

impl ConfigFileName {
    /// Search order within a single directory.
    pub const ALL: [ConfigFileName; 4] = [Self::Toml, Self::Json, Self::Yaml, Self::Yml];

    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toml => "refresh.toml",
            Self::Json => "refresh.json",
            Self::Yaml => "refresh.yaml",
            Self::Yml => "refresh.yml",
        }
    }
}

impl AsRef<Path> for ConfigFileName {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

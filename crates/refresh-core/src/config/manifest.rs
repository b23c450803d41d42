//! Manifest parsing for refresh.toml files
//!
//! The manifest is the on-disk form of a refresh: which folders to pack,
//! which to reinstall, and how the package manager is invoked.

use crate::{Error, Result};
use refresh_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

fn default_root() -> String {
    ".".to_string()
}

fn default_program() -> String {
    "npm".to_string()
}

fn default_pack() -> Vec<String> {
    vec!["pack".to_string()]
}

fn default_install() -> Vec<String> {
    vec!["install".to_string()]
}

fn default_cache_dir() -> String {
    "node_modules".to_string()
}

fn default_lock_file() -> String {
    "package-lock.json".to_string()
}

fn default_archive_extension() -> String {
    "tgz".to_string()
}

/// How the external package manager is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerSection {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments of the packaging command
    #[serde(default = "default_pack")]
    pub pack: Vec<String>,

    /// Arguments of the install command
    #[serde(default = "default_install")]
    pub install: Vec<String>,
}

impl Default for PackageManagerSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            pack: default_pack(),
            install: default_install(),
        }
    }
}

/// Names of the artifacts the package manager leaves behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactNames {
    /// Dependency cache directory inside a target folder
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Lock file inside a target folder
    #[serde(default = "default_lock_file")]
    pub lock_file: String,

    /// Extension of packed archives, without the leading dot
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            lock_file: default_lock_file(),
            archive_extension: default_archive_extension(),
        }
    }
}

impl ArtifactNames {
    /// Check the names and strip a leading dot from the archive extension.
    pub fn normalized(self) -> Result<Self> {
        let cache_dir = single_component("artifacts.cache_dir", &self.cache_dir)?;
        let lock_file = single_component("artifacts.lock_file", &self.lock_file)?;

        let archive_extension = self.archive_extension.trim().trim_start_matches('.').to_string();
        if archive_extension.is_empty() || archive_extension.contains(['/', '\\']) {
            return Err(Error::invalid_manifest(format!(
                "artifacts.archive_extension '{}' is not a file extension",
                self.archive_extension
            )));
        }

        Ok(Self {
            cache_dir,
            lock_file,
            archive_extension,
        })
    }
}

fn single_component(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(Error::invalid_manifest(format!(
            "{key} '{value}' must be a single file or directory name"
        )));
    }
    Ok(trimmed.to_string())
}

/// Refresh manifest parsed from refresh.toml (or .json/.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshManifest {
    /// Project root, relative to the manifest's directory
    #[serde(default = "default_root")]
    pub root: String,

    /// Folders packed into archives, in order, before any target
    #[serde(default)]
    pub shared: Vec<String>,

    /// Folders whose dependencies are reinstalled, in order
    #[serde(default)]
    pub targets: Vec<String>,

    #[serde(default)]
    pub package_manager: PackageManagerSection,

    #[serde(default)]
    pub artifacts: ArtifactNames,
}

impl Default for RefreshManifest {
    fn default() -> Self {
        Self {
            root: default_root(),
            shared: Vec::new(),
            targets: Vec::new(),
            package_manager: PackageManagerSection::default(),
            artifacts: ArtifactNames::default(),
        }
    }
}

impl RefreshManifest {
    /// Parse a manifest from TOML content
    ///
    /// ```
    /// use refresh_core::config::RefreshManifest;
    ///
    /// let manifest = RefreshManifest::parse(r#"
    /// shared = ["shared"]
    /// targets = ["user/functions/user-core"]
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.root, ".");
    /// assert_eq!(manifest.package_manager.program, "npm");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: RefreshManifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest in whichever format its extension names.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Starter manifest written by `refresh init`.
    pub fn starter() -> Self {
        Self {
            shared: vec!["shared".to_string()],
            targets: vec!["functions/example".to_string()],
            ..Self::default()
        }
    }
}

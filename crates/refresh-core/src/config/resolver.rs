//! Locating the manifest and resolving the project root
//!
//! The project root is never a literal machine path baked into the tool.
//! It comes from an explicit override or from the manifest's `root` key,
//! which is interpreted relative to the manifest's own directory.

use std::path::{Path, PathBuf};

use refresh_fs::{ConfigFileName, NormalizedPath, validate_folder_fragment};

use super::manifest::{ArtifactNames, PackageManagerSection, RefreshManifest};
use crate::{Error, Result};

/// Fully validated refresh configuration with an absolute project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Absolute, canonical project root
    pub root: NormalizedPath,

    /// Canonical shared folder fragments, declaration order
    pub shared: Vec<String>,

    /// Canonical target folder fragments, declaration order
    pub targets: Vec<String>,

    pub package_manager: PackageManagerSection,

    pub artifacts: ArtifactNames,
}

impl RefreshConfig {
    /// Build a configuration rooted at `root`.
    ///
    /// `manifest.root` is ignored; `root` must be an existing directory.
    pub fn new(root: &Path, manifest: RefreshManifest) -> Result<Self> {
        let root = refresh_fs::io::canonicalize_dir(root).map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;

        let shared = validate_list(&manifest.shared)?;
        let targets = validate_list(&manifest.targets)?;

        if manifest.package_manager.program.trim().is_empty() {
            return Err(Error::invalid_manifest(
                "package_manager.program must not be empty",
            ));
        }

        Ok(Self {
            root: NormalizedPath::new(root),
            shared,
            targets,
            package_manager: manifest.package_manager,
            artifacts: manifest.artifacts.normalized()?,
        })
    }

    /// Build a configuration whose root is `manifest.root` joined onto `base_dir`.
    pub fn from_manifest(manifest: RefreshManifest, base_dir: &Path) -> Result<Self> {
        let root = base_dir.join(&manifest.root);
        Self::new(&root, manifest)
    }

    /// Absolute path of a declared folder fragment.
    pub fn folder_path(&self, fragment: &str) -> NormalizedPath {
        self.root.join(fragment)
    }
}

fn validate_list(fragments: &[String]) -> Result<Vec<String>> {
    fragments
        .iter()
        .map(|fragment| validate_folder_fragment(fragment).map_err(Error::from))
        .collect()
}

/// Finds the manifest and turns it into a [`RefreshConfig`]
///
/// Search order when no explicit file is given:
/// 1. the working directory and each of its ancestors, trying
///    `refresh.toml`, `refresh.json`, `refresh.yaml`, `refresh.yml`
/// 2. the directory containing the running executable
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cwd: PathBuf,
    config_file: Option<PathBuf>,
    root_override: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            config_file: None,
            root_override: None,
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }

    /// Use this manifest instead of searching. Relative paths are taken
    /// from the working directory.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Use this project root instead of the manifest's `root` key.
    pub fn with_root_override(mut self, root: Option<PathBuf>) -> Self {
        self.root_override = root;
        self
    }

    /// Replace the executable directory used as the last search location.
    pub fn with_exe_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.exe_dir = dir;
        self
    }

    /// Find the manifest file.
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(explicit) = &self.config_file {
            let path = self.cwd.join(explicit);
            if path.is_file() {
                return Ok(path);
            }
            return Err(Error::ConfigNotFound {
                searched: vec![path],
            });
        }

        let mut searched = Vec::new();
        let dirs = self
            .cwd
            .ancestors()
            .map(Path::to_path_buf)
            .chain(self.exe_dir.clone());

        for dir in dirs {
            if let Some(found) = find_in_dir(&dir) {
                tracing::debug!(path = %found.display(), "found refresh manifest");
                return Ok(found);
            }
            searched.push(dir);
        }

        Err(Error::ConfigNotFound { searched })
    }

    /// Locate, load and validate the manifest.
    pub fn resolve(&self) -> Result<RefreshConfig> {
        let path = self.locate()?;
        let manifest = RefreshManifest::load(&NormalizedPath::new(&path))?;

        if let Some(root) = &self.root_override {
            let root = self.cwd.join(root);
            tracing::debug!(root = %root.display(), "using root override");
            return RefreshConfig::new(&root, manifest);
        }

        let base_dir = path.parent().unwrap_or(&self.cwd).to_path_buf();
        RefreshConfig::from_manifest(manifest, &base_dir)
    }
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    ConfigFileName::ALL
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

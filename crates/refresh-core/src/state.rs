//! Per-folder state inspection
//!
//! [`FolderState`] is recomputed every time it is needed and never stored.

use refresh_fs::NormalizedPath;

use crate::Result;
use crate::config::ArtifactNames;
use crate::package_manager::Phase;

/// What is currently on disk for one declared folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderState {
    pub path: NormalizedPath,
    /// The folder exists and is a directory
    pub exists: bool,
    /// Path of the dependency cache directory, if present
    pub cache_dir: Option<NormalizedPath>,
    /// Path of the lock file, if present
    pub lock_file: Option<NormalizedPath>,
    /// Archive files directly inside the folder, sorted by name. Only
    /// listed for [`Phase::Pack`], the one phase that deletes them.
    pub archives: Vec<NormalizedPath>,
}

impl FolderState {
    /// Inspect `path` for the artifacts `phase` cares about, without
    /// modifying anything.
    ///
    /// A missing folder is a valid state, not an error. Only a failure to
    /// list archives inside an existing shared folder is reported as an
    /// error.
    pub fn inspect(
        path: &NormalizedPath,
        artifacts: &ArtifactNames,
        phase: Phase,
    ) -> Result<Self> {
        if !path.is_dir() {
            tracing::debug!(path = %path, "folder missing");
            return Ok(Self::missing(path.clone()));
        }

        let cache_dir = path.join(&artifacts.cache_dir);
        let lock_file = path.join(&artifacts.lock_file);
        let archives = match phase {
            Phase::Pack => {
                refresh_fs::io::list_files_with_extension(path, &artifacts.archive_extension)?
            }
            Phase::Install => Vec::new(),
        };

        let state = Self {
            path: path.clone(),
            exists: true,
            cache_dir: present(cache_dir),
            lock_file: present(lock_file),
            archives,
        };
        tracing::debug!(
            path = %path,
            cache_dir = state.cache_dir.is_some(),
            lock_file = state.lock_file.is_some(),
            archives = state.archives.len(),
            "inspected folder"
        );
        Ok(state)
    }

    pub fn missing(path: NormalizedPath) -> Self {
        Self {
            path,
            exists: false,
            cache_dir: None,
            lock_file: None,
            archives: Vec::new(),
        }
    }

    /// Nothing left for a refresh to delete.
    pub fn is_clean(&self) -> bool {
        self.cache_dir.is_none() && self.lock_file.is_none() && self.archives.is_empty()
    }
}

// Anything occupying the path counts, including a broken symlink
fn present(path: NormalizedPath) -> Option<NormalizedPath> {
    std::fs::symlink_metadata(path.to_native()).ok().map(|_| path)
}

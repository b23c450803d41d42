//! Dependency Resynchronizer: reinstall a target folder from scratch

use refresh_fs::NormalizedPath;

use super::{Cleanup, RunContext, refresh_folder};
use crate::config::ArtifactNames;
use crate::event::ArtifactKind;
use crate::package_manager::Phase;
use crate::report::FolderReport;
use crate::state::FolderState;

/// Deletes a target folder's dependency cache and lock file, then runs the
/// install command there.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyResynchronizer;

impl DependencyResynchronizer {
    pub fn new() -> Self {
        Self
    }

    pub async fn resync(
        &self,
        ctx: &mut RunContext<'_>,
        folder: &str,
        path: &NormalizedPath,
    ) -> FolderReport {
        refresh_folder(ctx, Phase::Install, folder, path, stale_dependencies).await
    }
}

// Cache before lock file: a failure on the cache keeps the lock file intact
fn stale_dependencies(state: &FolderState, artifacts: &ArtifactNames) -> Vec<Cleanup> {
    vec![
        Cleanup::new(
            ArtifactKind::CacheDir,
            artifacts.cache_dir.clone(),
            state.cache_dir.iter().cloned().collect(),
        ),
        Cleanup::new(
            ArtifactKind::LockFile,
            artifacts.lock_file.clone(),
            state.lock_file.iter().cloned().collect(),
        ),
    ]
}

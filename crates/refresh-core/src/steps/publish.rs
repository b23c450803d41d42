//! Archive Publisher: re-pack a shared folder

use refresh_fs::NormalizedPath;

use super::{Cleanup, RunContext, refresh_folder};
use crate::config::ArtifactNames;
use crate::event::ArtifactKind;
use crate::package_manager::Phase;
use crate::report::FolderReport;
use crate::state::FolderState;

/// Deletes every archive directly inside a shared folder, then runs the
/// packaging command there to produce a fresh one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchivePublisher;

impl ArchivePublisher {
    pub fn new() -> Self {
        Self
    }

    pub async fn publish(
        &self,
        ctx: &mut RunContext<'_>,
        folder: &str,
        path: &NormalizedPath,
    ) -> FolderReport {
        refresh_folder(ctx, Phase::Pack, folder, path, stale_archives).await
    }
}

fn stale_archives(state: &FolderState, artifacts: &ArtifactNames) -> Vec<Cleanup> {
    vec![Cleanup::new(
        ArtifactKind::Archive,
        format!("*.{}", artifacts.archive_extension),
        state.archives.clone(),
    )]
}

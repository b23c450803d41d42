//! Results of a refresh run

use refresh_fs::NormalizedPath;

use crate::package_manager::{CommandOutcome, CommandSpec, Phase};

/// What happened to one declared folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    /// Folder absent; nothing was deleted or run
    Missing,
    /// Stale artifacts removed and the command ran
    Refreshed {
        removed: Vec<NormalizedPath>,
        command: CommandOutcome,
    },
    /// Dry run
    Planned {
        would_remove: Vec<NormalizedPath>,
        command: CommandSpec,
    },
    /// Filesystem failure; the folder's remaining steps were skipped
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub phase: Phase,
    pub folder: String,
    pub path: NormalizedPath,
    pub outcome: FolderOutcome,
}

/// Per-folder results in processing order: shared folders, then targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub folders: Vec<FolderReport>,
}

/// Counts for the end-of-run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub refreshed: usize,
    pub planned: usize,
    pub missing: usize,
    pub failed: usize,
    pub failed_commands: usize,
}

impl RunReport {
    /// Folders aborted by a filesystem failure.
    pub fn failed_folders(&self) -> impl Iterator<Item = &FolderReport> {
        self.folders
            .iter()
            .filter(|r| matches!(r.outcome, FolderOutcome::Failed { .. }))
    }

    /// Folders whose command ran but did not succeed.
    pub fn failed_commands(&self) -> impl Iterator<Item = (&FolderReport, &CommandOutcome)> {
        self.folders.iter().filter_map(|r| match &r.outcome {
            FolderOutcome::Refreshed { command, .. } if !command.is_success() => Some((r, command)),
            _ => None,
        })
    }

    pub fn has_filesystem_failures(&self) -> bool {
        self.failed_folders().next().is_some()
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for report in &self.folders {
            match &report.outcome {
                FolderOutcome::Missing => summary.missing += 1,
                FolderOutcome::Planned { .. } => summary.planned += 1,
                FolderOutcome::Failed { .. } => summary.failed += 1,
                FolderOutcome::Refreshed { command, .. } => {
                    summary.refreshed += 1;
                    if !command.is_success() {
                        summary.failed_commands += 1;
                    }
                }
            }
        }
        summary
    }
}

//! Sequencing a full workspace refresh
//!
//! Every shared folder is packed before any target folder is reinstalled,
//! because targets may reference the freshly packed archives. Folders are
//! processed one at a time in declaration order and each is attempted
//! regardless of what happened to the ones before it.

use crate::Result;
use crate::config::RefreshConfig;
use crate::event::{RefreshEvent, RefreshObserver};
use crate::package_manager::{PackageManager, Phase};
use crate::report::RunReport;
use crate::state::FolderState;
use crate::steps::{ArchivePublisher, DependencyResynchronizer, RunContext};

/// State of one declared folder, for `refresh status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderStatus {
    pub phase: Phase,
    pub folder: String,
    pub state: FolderState,
}

/// Drives the Archive Publisher and the Dependency Resynchronizer over a
/// [`RefreshConfig`].
pub struct Orchestrator<'a> {
    config: &'a RefreshConfig,
    package_manager: &'a dyn PackageManager,
    dry_run: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a RefreshConfig, package_manager: &'a dyn PackageManager) -> Self {
        Self {
            config,
            package_manager,
            dry_run: false,
        }
    }

    /// Plan only: nothing is deleted and no command is spawned.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Refresh every declared folder and report what happened to each.
    ///
    /// Never fails: missing folders are skipped, filesystem failures end
    /// only the folder they occur in, command failures are recorded.
    pub async fn run(&self, observer: &mut dyn RefreshObserver) -> RunReport {
        tracing::info!(
            root = %self.config.root,
            shared = self.config.shared.len(),
            targets = self.config.targets.len(),
            dry_run = self.dry_run,
            "starting workspace refresh"
        );

        let mut ctx = RunContext {
            package_manager: self.package_manager,
            observer,
            artifacts: &self.config.artifacts,
            dry_run: self.dry_run,
        };
        let mut report = RunReport::default();

        ctx.observer.on_event(&RefreshEvent::PhaseStarted {
            phase: Phase::Pack,
            folders: self.config.shared.len(),
        });
        let publisher = ArchivePublisher::new();
        for folder in &self.config.shared {
            let path = self.config.folder_path(folder);
            report
                .folders
                .push(publisher.publish(&mut ctx, folder, &path).await);
        }

        ctx.observer.on_event(&RefreshEvent::PhaseStarted {
            phase: Phase::Install,
            folders: self.config.targets.len(),
        });
        let resynchronizer = DependencyResynchronizer::new();
        for folder in &self.config.targets {
            let path = self.config.folder_path(folder);
            report
                .folders
                .push(resynchronizer.resync(&mut ctx, folder, &path).await);
        }

        let summary = report.summary();
        tracing::info!(
            refreshed = summary.refreshed,
            missing = summary.missing,
            failed = summary.failed,
            failed_commands = summary.failed_commands,
            "workspace refresh finished"
        );
        report
    }

    /// Inspect every declared folder without changing anything.
    pub fn status(&self) -> Result<Vec<FolderStatus>> {
        let shared = self.config.shared.iter().map(|f| (Phase::Pack, f));
        let targets = self.config.targets.iter().map(|f| (Phase::Install, f));

        shared
            .chain(targets)
            .map(|(phase, folder)| -> Result<FolderStatus> {
                let path = self.config.folder_path(folder);
                let state = FolderState::inspect(&path, &self.config.artifacts, phase)?;
                Ok(FolderStatus {
                    phase,
                    folder: folder.clone(),
                    state,
                })
            })
            .collect()
    }
}

/// Refresh the workspace described by `config`.
pub async fn run(
    config: &RefreshConfig,
    package_manager: &dyn PackageManager,
    observer: &mut dyn RefreshObserver,
) -> RunReport {
    Orchestrator::new(config, package_manager).run(observer).await
}

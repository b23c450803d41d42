//! Per-folder refresh steps
//!
//! Both steps share one shape: inspect the folder, delete what is stale,
//! then run the package manager in it. A filesystem failure anywhere in
//! that sequence ends the folder (its command is not run) and is recorded
//! in the report; it never propagates to the caller.

mod publish;
mod resync;

pub use publish::ArchivePublisher;
pub use resync::DependencyResynchronizer;

use refresh_fs::NormalizedPath;

use crate::Result;
use crate::config::ArtifactNames;
use crate::event::{ArtifactKind, RefreshEvent, RefreshObserver};
use crate::package_manager::{PackageManager, Phase};
use crate::report::{FolderOutcome, FolderReport};
use crate::state::FolderState;

/// Collaborators shared by every folder of a run
pub struct RunContext<'a> {
    pub package_manager: &'a dyn PackageManager,
    pub observer: &'a mut dyn RefreshObserver,
    pub artifacts: &'a ArtifactNames,
    /// Report what would happen without deleting or spawning anything
    pub dry_run: bool,
}

impl RunContext<'_> {
    fn emit(&mut self, event: RefreshEvent) {
        self.observer.on_event(&event);
    }
}

/// Stale artifacts of one kind found in a folder
pub(crate) struct Cleanup {
    kind: ArtifactKind,
    /// Shown when nothing was found, e.g. `node_modules` or `*.tgz`
    name: String,
    found: Vec<NormalizedPath>,
}

impl Cleanup {
    pub(crate) fn new(
        kind: ArtifactKind,
        name: impl Into<String>,
        found: Vec<NormalizedPath>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            found,
        }
    }
}

/// Run one folder through inspection, cleanup and command.
pub(crate) async fn refresh_folder(
    ctx: &mut RunContext<'_>,
    phase: Phase,
    folder: &str,
    path: &NormalizedPath,
    stale: fn(&FolderState, &ArtifactNames) -> Vec<Cleanup>,
) -> FolderReport {
    ctx.emit(RefreshEvent::FolderStarted {
        phase,
        folder: folder.to_string(),
        path: path.clone(),
    });

    let outcome = match try_refresh_folder(ctx, phase, path, stale).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let error = e.to_string();
            tracing::warn!(%phase, folder, error = %error, "folder aborted");
            ctx.emit(RefreshEvent::FolderFailed {
                folder: folder.to_string(),
                error: error.clone(),
            });
            FolderOutcome::Failed { error }
        }
    };

    if outcome == FolderOutcome::Missing {
        ctx.emit(RefreshEvent::FolderMissing {
            phase,
            folder: folder.to_string(),
            path: path.clone(),
        });
    }

    FolderReport {
        phase,
        folder: folder.to_string(),
        path: path.clone(),
        outcome,
    }
}

async fn try_refresh_folder(
    ctx: &mut RunContext<'_>,
    phase: Phase,
    path: &NormalizedPath,
    stale: fn(&FolderState, &ArtifactNames) -> Vec<Cleanup>,
) -> Result<FolderOutcome> {
    let state = FolderState::inspect(path, ctx.artifacts, phase)?;
    if !state.exists {
        return Ok(FolderOutcome::Missing);
    }

    let mut removed = Vec::new();
    for cleanup in stale(&state, ctx.artifacts) {
        if cleanup.found.is_empty() {
            ctx.emit(RefreshEvent::NothingToRemove {
                kind: cleanup.kind,
                name: cleanup.name,
            });
            continue;
        }
        for target in cleanup.found {
            if ctx.dry_run {
                ctx.emit(RefreshEvent::WouldRemove {
                    kind: cleanup.kind,
                    path: target.clone(),
                });
            } else {
                remove(cleanup.kind, &target)?;
                ctx.emit(RefreshEvent::Removed {
                    kind: cleanup.kind,
                    path: target.clone(),
                });
            }
            removed.push(target);
        }
    }

    let command = ctx.package_manager.command(phase);
    if ctx.dry_run {
        ctx.emit(RefreshEvent::CommandPlanned {
            command: command.clone(),
            dir: path.clone(),
        });
        return Ok(FolderOutcome::Planned {
            would_remove: removed,
            command,
        });
    }

    ctx.emit(RefreshEvent::CommandStarted {
        command: command.clone(),
        dir: path.clone(),
    });
    let outcome = ctx.package_manager.run(phase, path).await;
    ctx.emit(RefreshEvent::CommandFinished {
        command,
        outcome: outcome.clone(),
    });

    tracing::info!(%phase, path = %path, removed = removed.len(), %outcome, "folder refreshed");
    Ok(FolderOutcome::Refreshed {
        removed,
        command: outcome,
    })
}

fn remove(kind: ArtifactKind, path: &NormalizedPath) -> Result<()> {
    match kind {
        ArtifactKind::CacheDir => refresh_fs::io::remove_entry(path)?,
        ArtifactKind::Archive | ArtifactKind::LockFile => refresh_fs::io::remove_file(path)?,
    }
    Ok(())
}

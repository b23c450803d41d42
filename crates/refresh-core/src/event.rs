//! Progress events emitted while a refresh runs

use refresh_fs::NormalizedPath;

use crate::package_manager::{CommandOutcome, CommandSpec, Phase};

/// Kind of artifact a refresh step deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Archive,
    CacheDir,
    LockFile,
}

/// One step of progress, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    PhaseStarted {
        phase: Phase,
        folders: usize,
    },
    FolderStarted {
        phase: Phase,
        folder: String,
        path: NormalizedPath,
    },
    FolderMissing {
        phase: Phase,
        folder: String,
        path: NormalizedPath,
    },
    Removed {
        kind: ArtifactKind,
        path: NormalizedPath,
    },
    /// Dry run: `path` would have been removed
    WouldRemove {
        kind: ArtifactKind,
        path: NormalizedPath,
    },
    /// Already clean; `name` is the configured artifact name
    NothingToRemove {
        kind: ArtifactKind,
        name: String,
    },
    CommandStarted {
        command: CommandSpec,
        dir: NormalizedPath,
    },
    /// Dry run: `command` would have been run in `dir`
    CommandPlanned {
        command: CommandSpec,
        dir: NormalizedPath,
    },
    CommandFinished {
        command: CommandSpec,
        outcome: CommandOutcome,
    },
    FolderFailed {
        folder: String,
        error: String,
    },
}

/// Receives progress events
pub trait RefreshObserver {
    fn on_event(&mut self, event: &RefreshEvent);
}

/// Discards every event
#[derive(Debug, Default)]
pub struct NullObserver;

impl RefreshObserver for NullObserver {
    fn on_event(&mut self, _event: &RefreshEvent) {}
}

/// Keeps every event, in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<RefreshEvent>,
}

impl RefreshObserver for RecordingObserver {
    fn on_event(&mut self, event: &RefreshEvent) {
        self.events.push(event.clone());
    }
}

//! Core orchestration for Workspace Refresh
//!
//! A refresh packs every shared library folder into a fresh archive and then
//! reinstalls the dependencies of every target folder from scratch:
//!
//! 1. [`ArchivePublisher`]: delete old archives, run the packaging command
//! 2. [`DependencyResynchronizer`]: delete the dependency cache and lock
//!    file, run the install command
//!
//! [`Orchestrator`] sequences the two over a [`RefreshConfig`], reporting
//! progress through a [`RefreshObserver`] and returning a [`RunReport`].

pub mod config;
pub mod error;
pub mod event;
pub mod orchestrator;
pub mod package_manager;
pub mod report;
pub mod state;
pub mod steps;

pub use config::{
    ArtifactNames, ConfigResolver, PackageManagerSection, RefreshConfig, RefreshManifest,
};
pub use error::{Error, Result};
pub use event::{ArtifactKind, NullObserver, RecordingObserver, RefreshEvent, RefreshObserver};
pub use orchestrator::{FolderStatus, Orchestrator, run};
pub use package_manager::{CommandOutcome, CommandSpec, PackageManager, Phase, SystemPackageManager};
pub use report::{FolderOutcome, FolderReport, RunReport, RunSummary};
pub use state::FolderState;
pub use steps::{ArchivePublisher, DependencyResynchronizer, RunContext};

//! Filesystem primitives for Workspace Refresh
//!
//! Provides normalized path handling, folder-fragment validation, the
//! deletion and listing operations the refresh steps are built from, and
//! format-agnostic configuration loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ConfigFileName;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_folder_fragment};

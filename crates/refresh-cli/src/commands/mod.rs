//! Command implementations

mod init;
mod run;
mod status;

use std::path::{Path, PathBuf};

use refresh_core::{ConfigResolver, RefreshConfig};

use crate::error::Result;

pub use init::run_init;
pub use run::run_refresh;
pub use status::run_status;

/// Manifest and root selection shared by `run` and `status`
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

impl ConfigArgs {
    /// Locate and validate the refresh configuration, starting from `cwd`.
    pub fn resolve(&self, cwd: &Path) -> Result<RefreshConfig> {
        let config = ConfigResolver::new(cwd)
            .with_config_file(self.config.clone())
            .with_root_override(self.root.clone())
            .resolve()?;
        tracing::debug!(root = %config.root, "resolved refresh configuration");
        Ok(config)
    }
}

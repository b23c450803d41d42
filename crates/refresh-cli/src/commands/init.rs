//! The `init` command: write a starter manifest

use std::path::{Path, PathBuf};

use colored::Colorize;

use refresh_core::RefreshManifest;
use refresh_fs::{ConfigFileName, ConfigStore, NormalizedPath};

use crate::error::{CliError, Result};

/// Write a starter manifest to `target`, or `refresh.toml` in `cwd`.
///
/// The format follows the file extension. An existing file is only
/// replaced with `force`.
pub fn run_init(cwd: &Path, target: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match target {
        Some(target) => cwd.join(target),
        None => cwd.join(ConfigFileName::Toml),
    };

    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigStore::new().save(&NormalizedPath::new(&path), &RefreshManifest::starter())?;
    tracing::debug!(path = %path.display(), "wrote starter manifest");

    println!(
        "{} Wrote {}",
        "OK".green().bold(),
        path.display().to_string().cyan()
    );
    println!(
        "   Edit {} and {} to list your folders, then run {}.",
        "shared".cyan(),
        "targets".cyan(),
        "refresh".cyan()
    );
    Ok(path)
}

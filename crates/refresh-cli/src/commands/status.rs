//! The `status` command: show what a refresh would find

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use refresh_core::{
    FolderStatus, Orchestrator, PackageManager, Phase, RefreshConfig, SystemPackageManager,
};

use super::ConfigArgs;
use crate::error::Result;

/// Print the on-disk state of every declared folder. Changes nothing.
pub fn run_status(cwd: &Path, args: &ConfigArgs) -> Result<()> {
    let config = args.resolve(cwd)?;
    let package_manager = SystemPackageManager::new(config.package_manager.clone());
    let statuses = Orchestrator::new(&config, &package_manager).status()?;

    let stdout = io::stdout();
    render_status(&mut stdout.lock(), &config, &package_manager, &statuses)?;
    Ok(())
}

/// Write the status listing for `statuses` to `out`.
pub fn render_status<W: Write>(
    out: &mut W,
    config: &RefreshConfig,
    package_manager: &dyn PackageManager,
    statuses: &[FolderStatus],
) -> io::Result<()> {
    writeln!(
        out,
        "{} Workspace root: {}",
        "=>".blue().bold(),
        config.root.to_string().cyan()
    )?;

    for (phase, title) in [
        (Phase::Pack, "Shared folders"),
        (Phase::Install, "Target folders"),
    ] {
        writeln!(out)?;
        writeln!(out, "{} ({}):", title.bold(), package_manager.command(phase))?;

        let mut any = false;
        for status in statuses.iter().filter(|s| s.phase == phase) {
            any = true;
            let state = &status.state;
            if !state.exists {
                writeln!(out, "   {} {}", "MISSING".yellow().bold(), status.folder)?;
                continue;
            }

            let detail = match phase {
                Phase::Pack => {
                    let names: Vec<&str> =
                        state.archives.iter().filter_map(|a| a.file_name()).collect();
                    if names.is_empty() {
                        format!("no *.{} archives", config.artifacts.archive_extension)
                    } else {
                        format!("{} archive(s): {}", names.len(), names.join(", "))
                    }
                }
                Phase::Install => format!(
                    "{}: {}, {}: {}",
                    config.artifacts.cache_dir,
                    yes_no(state.cache_dir.is_some()),
                    config.artifacts.lock_file,
                    yes_no(state.lock_file.is_some())
                ),
            };
            writeln!(out, "   {} {}  {}", "OK".green().bold(), status.folder, detail.dimmed())?;
        }

        if !any {
            writeln!(out, "   {}", "(none declared)".dimmed())?;
        }
    }
    Ok(())
}

fn yes_no(present: bool) -> &'static str {
    if present { "yes" } else { "no" }
}

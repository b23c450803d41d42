//! The `run` command: pack shared folders, then reinstall targets

use std::path::Path;

use colored::Colorize;

use refresh_core::{Orchestrator, RunReport, SystemPackageManager};

use super::ConfigArgs;
use crate::console::ConsoleObserver;
use crate::error::{CliError, Result};

/// Run a full workspace refresh.
///
/// Folder failures never stop the run; they are turned into a non-zero exit
/// once every folder has been attempted. Command failures only do so with
/// `strict`.
pub fn run_refresh(cwd: &Path, args: &ConfigArgs, dry_run: bool, strict: bool) -> Result<()> {
    let config = args.resolve(cwd)?;

    println!(
        "{} Refreshing workspace at {}{}",
        "=>".blue().bold(),
        config.root.to_string().cyan(),
        if dry_run { " (dry run)" } else { "" }
    );

    let package_manager = SystemPackageManager::new(config.package_manager.clone());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut console = ConsoleObserver::stdout();
    let report = runtime.block_on(
        Orchestrator::new(&config, &package_manager)
            .dry_run(dry_run)
            .run(&mut console),
    );
    console.summary(&report, dry_run);

    verdict(&report, strict)
}

fn verdict(report: &RunReport, strict: bool) -> Result<()> {
    let summary = report.summary();
    if summary.failed > 0 {
        return Err(CliError::Incomplete {
            message: format!("{} folder(s) could not be refreshed", summary.failed),
        });
    }
    if strict && summary.failed_commands > 0 {
        return Err(CliError::Incomplete {
            message: format!("{} command(s) did not succeed", summary.failed_commands),
        });
    }
    Ok(())
}

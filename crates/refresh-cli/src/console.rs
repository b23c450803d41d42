//! Human-readable progress output

use std::fmt;
use std::io::{self, Write};

use colored::Colorize;

use refresh_core::{ArtifactKind, Phase, RefreshEvent, RefreshObserver, RunReport};

/// Prints every [`RefreshEvent`] as one line of colored text
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    // Progress output is best effort; a closed stdout must not abort a refresh.
    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_all(b"\n");
    }

    /// Print the end-of-run summary.
    ///
    /// The completion line is printed whatever the outcome; failures are
    /// listed after it.
    pub fn summary(&mut self, report: &RunReport, dry_run: bool) {
        let summary = report.summary();
        self.line(format_args!(""));
        if dry_run {
            self.line(format_args!(
                "{} Dry run complete, nothing was changed.",
                "OK".green().bold()
            ));
        } else {
            self.line(format_args!("{} All done!", "OK".green().bold()));
        }

        let handled = if dry_run {
            format!("{} planned", summary.planned)
        } else {
            format!("{} refreshed", summary.refreshed)
        };
        self.line(format_args!(
            "   {}, {} missing, {} failed",
            handled, summary.missing, summary.failed
        ));

        if summary.failed_commands > 0 {
            self.line(format_args!(
                "{} {} command(s) did not succeed:",
                "WARN".yellow().bold(),
                summary.failed_commands
            ));
            let failures: Vec<String> = report
                .failed_commands()
                .map(|(folder, outcome)| {
                    format!("{} ({}): {}", folder.folder, folder.phase, outcome)
                })
                .collect();
            for failure in failures {
                self.line(format_args!("   {} {}", "!".yellow(), failure));
            }
        }

        if summary.failed > 0 {
            self.line(format_args!(
                "{} {} folder(s) could not be refreshed:",
                "FAILED".red().bold(),
                summary.failed
            ));
            let failures: Vec<String> = report
                .failed_folders()
                .map(|folder| match &folder.outcome {
                    refresh_core::FolderOutcome::Failed { error } => {
                        format!("{}: {}", folder.folder, error)
                    }
                    _ => folder.folder.clone(),
                })
                .collect();
            for failure in failures {
                self.line(format_args!("   {} {}", "x".red(), failure));
            }
        }
    }
}

fn artifact_label(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Archive => "archive",
        ArtifactKind::CacheDir => "dependency cache",
        ArtifactKind::LockFile => "lock file",
    }
}

impl<W: Write> RefreshObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &RefreshEvent) {
        match event {
            RefreshEvent::PhaseStarted { phase, folders } => {
                let heading = match phase {
                    Phase::Pack => format!("Packing {} shared folder(s)", folders),
                    Phase::Install => {
                        format!("Reinstalling dependencies in {} target folder(s)", folders)
                    }
                };
                self.line(format_args!("{} {}", "=>".blue().bold(), heading));
            }
            RefreshEvent::FolderStarted { path, .. } => {
                self.line(format_args!(""));
                self.line(format_args!("{} {}", "==>".cyan().bold(), path.to_string().cyan()));
            }
            RefreshEvent::FolderMissing { phase, folder, path } => {
                let what = match phase {
                    Phase::Pack => "Shared folder not found",
                    Phase::Install => "Skipping missing folder",
                };
                self.line(format_args!(
                    "{} {}: {} ({})",
                    "SKIP".yellow().bold(),
                    what,
                    folder,
                    path.to_string().dimmed()
                ));
            }
            RefreshEvent::Removed { kind, path } => {
                self.line(format_args!(
                    "   {} Removed {} {}",
                    "-".red(),
                    artifact_label(*kind),
                    path
                ));
            }
            RefreshEvent::WouldRemove { kind, path } => {
                self.line(format_args!(
                    "   {} Would remove {} {}",
                    "~".yellow(),
                    artifact_label(*kind),
                    path
                ));
            }
            RefreshEvent::NothingToRemove { name, .. } => {
                self.line(format_args!("   {} No {} found.", "i".dimmed(), name));
            }
            RefreshEvent::CommandStarted { command, .. } => {
                self.line(format_args!(
                    "   {} Running {}...",
                    ">".blue(),
                    command.to_string().cyan()
                ));
            }
            RefreshEvent::CommandPlanned { command, dir } => {
                self.line(format_args!(
                    "   {} Would run {} in {}",
                    ">".blue(),
                    command.to_string().cyan(),
                    dir
                ));
            }
            RefreshEvent::CommandFinished { command, outcome } => {
                if outcome.is_success() {
                    self.line(format_args!("   {} {}", "OK".green().bold(), command));
                } else {
                    self.line(format_args!(
                        "   {} {} {}",
                        "WARN".yellow().bold(),
                        command,
                        outcome
                    ));
                }
            }
            RefreshEvent::FolderFailed { folder, error } => {
                self.line(format_args!(
                    "   {} {}: {}",
                    "FAILED".red().bold(),
                    folder,
                    error
                ));
            }
        }
    }
}

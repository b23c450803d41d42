//! The external package manager seam
//!
//! Packing and installing are delegated to an external program. The
//! [`PackageManager`] trait is the only place the refresh steps touch it,
//! so tests can substitute a recording fake.

use std::process::Stdio;

use async_trait::async_trait;
use refresh_fs::NormalizedPath;
use tokio::process::Command;

use crate::config::PackageManagerSection;

/// Which half of the refresh a folder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Shared folders: delete archives, re-pack
    Pack,
    /// Target folders: delete cache and lock file, reinstall
    Install,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pack => "pack",
            Self::Install => "install",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A program and its arguments, for display and execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How an external command ended
///
/// None of these stop the run; they are collected for the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded,
    /// Non-zero exit; `code` is `None` when killed by a signal
    Exited { code: Option<i32> },
    /// The process could not be spawned
    NotStarted { reason: String },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl std::fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Exited { code: Some(code) } => write!(f, "exited with code {}", code),
            Self::Exited { code: None } => write!(f, "terminated by signal"),
            Self::NotStarted { reason } => write!(f, "could not start: {}", reason),
        }
    }
}

/// Runs the packaging and install commands
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// The command line used for `phase`.
    fn command(&self, phase: Phase) -> CommandSpec;

    /// Run the `phase` command with `dir` as working directory and wait
    /// for it to exit.
    async fn run(&self, phase: Phase, dir: &NormalizedPath) -> CommandOutcome;
}

/// Spawns the configured program as a child process
///
/// Output streams are inherited so the package manager reports its own
/// progress and failures on the console. No timeout is applied.
#[derive(Debug, Clone)]
pub struct SystemPackageManager {
    section: PackageManagerSection,
}

impl SystemPackageManager {
    pub fn new(section: PackageManagerSection) -> Self {
        Self { section }
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        // npm and friends are .cmd shims on Windows, which only cmd can run
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&spec.program).args(&spec.args);
            cmd
        } else {
            let mut cmd = Command::new(&spec.program);
            cmd.args(&spec.args);
            cmd
        }
    }
}

#[async_trait]
impl PackageManager for SystemPackageManager {
    fn command(&self, phase: Phase) -> CommandSpec {
        let args = match phase {
            Phase::Pack => self.section.pack.clone(),
            Phase::Install => self.section.install.clone(),
        };
        CommandSpec::new(self.section.program.clone(), args)
    }

    async fn run(&self, phase: Phase, dir: &NormalizedPath) -> CommandOutcome {
        let spec = self.command(phase);
        let mut cmd = self.build(&spec);
        cmd.current_dir(dir.to_native())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::debug!(command = %spec, dir = %dir, "spawning package manager");
        match cmd.status().await {
            Ok(status) if status.success() => CommandOutcome::Succeeded,
            Ok(status) => {
                tracing::warn!(
                    command = %spec,
                    dir = %dir,
                    code = ?status.code(),
                    "command failed"
                );
                CommandOutcome::Exited {
                    code: status.code(),
                }
            }
            Err(e) => {
                tracing::warn!(command = %spec, dir = %dir, error = %e, "command could not start");
                CommandOutcome::NotStarted {
                    reason: e.to_string(),
                }
            }
        }
    }
}

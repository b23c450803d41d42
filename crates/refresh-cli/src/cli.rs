//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Workspace Refresh - re-pack shared libraries and reinstall dependencies
#[derive(Parser, Debug)]
#[command(name = "refresh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Refresh manifest to use instead of searching for refresh.toml
    #[arg(short, long, global = true, env = "REFRESH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root, overriding the manifest's `root`
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// The command to run (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Pack every shared folder, then reinstall every target folder
    ///
    /// Examples:
    ///   refresh                  # Same as `refresh run`
    ///   refresh run --dry-run    # Show what would be deleted and run
    ///   refresh run --strict     # Fail if any npm command failed
    Run {
        /// Preview deletions and commands without applying them
        #[arg(long)]
        dry_run: bool,

        /// Exit non-zero when a pack or install command fails
        #[arg(long)]
        strict: bool,
    },

    /// Show archives, caches and lock files of every declared folder
    Status,

    /// Write a starter manifest (refresh.toml, or the --config path)
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run {
            dry_run: false,
            strict: false,
        }
    }
}

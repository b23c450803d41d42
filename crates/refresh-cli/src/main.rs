//! Workspace Refresh CLI
//!
//! Re-packs the shared libraries of a multi-package project and reinstalls
//! the dependencies of every package that consumes them.

mod cli;
mod commands;
mod console;
mod error;
mod logging;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ConfigArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config_args = ConfigArgs {
        config: cli.config.clone(),
        root: cli.root.clone(),
    };

    match cli.command.unwrap_or_default() {
        Commands::Run { dry_run, strict } => {
            commands::run_refresh(&cwd, &config_args, dry_run, strict)
        }
        Commands::Status => commands::run_status(&cwd, &config_args),
        Commands::Init { force } => {
            commands::run_init(&cwd, config_args.config.as_deref(), force).map(|_| ())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "refresh", &mut io::stdout());
            Ok(())
        }
    }
}

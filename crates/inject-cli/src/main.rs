//! depinject CLI
//!
//! Rewrites `bower:<type>` marker blocks in source files so they reference
//! the installed dependency files, in dependency order.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Overrides;
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
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let overrides = Overrides {
        config: cli.config,
        src: cli.src,
        ignore_path: cli.ignore_path,
        include_self: cli.include_self,
    };

    match cli.command {
        Some(Commands::Stdin { path, file_type }) => commands::run_stdin(
            &cwd,
            &overrides,
            &path,
            file_type.as_deref(),
            &mut std::io::stdin().lock(),
            &mut std::io::stdout().lock(),
        ),
        None => commands::run_inject(&cwd, &overrides, cli.dry_run, cli.json),
    }
}

//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// depinject - Wire installed package files into marker blocks of your sources
#[derive(Parser, Debug)]
#[command(name = "depinject")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to depinject.toml when present)
    #[arg(short, long, global = true, env = "DEPINJECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Literal prefix removed from every injected path
    #[arg(long, global = true)]
    pub ignore_path: Option<String>,

    /// Treat files outside the package directory as the project's own
    #[arg(long, global = true)]
    pub include_self: bool,

    /// Consumer file to rewrite; repeat for several (replaces the configured list)
    #[arg(short, long = "src", value_name = "FILE")]
    pub src: Vec<PathBuf>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rewrite text read from stdin and print it to stdout
    ///
    /// Examples:
    ///   depinject stdin --path index.html < index.html
    ///   cat main.scss | depinject stdin --path styles/main.scss --file-type scss
    Stdin {
        /// Path the text is treated as coming from
        #[arg(short, long)]
        path: PathBuf,

        /// File type key (defaults to the extension of --path)
        #[arg(short = 't', long)]
        file_type: Option<String>,
    },
}

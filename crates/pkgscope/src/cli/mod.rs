//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use pkgscope_core::config::{parse_max_concurrency, MAX_THREADS_ENV};
use pkgscope_core::FilterOptions;

use commands::{CommitsCommand, PathsCommand};

/// pkgscope - keep only the commits that touched the current package
#[derive(Debug, Parser)]
#[command(name = "pkgscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    /// Maximum concurrent git queries (invalid values fall back to 500)
    #[arg(long, global = true, env = MAX_THREADS_ENV, value_name = "N")]
    pub max_threads: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List commits since the last release that touched this package
    Commits(CommitsCommand),

    /// Show the package paths commits are matched against
    Paths(PathsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            Commands::Commits(cmd) => rt.block_on(cmd.execute(self)),
            Commands::Paths(cmd) => rt.block_on(cmd.execute(self)),
        }
    }

    /// Filter options from flags and environment
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::new().with_max_concurrency(parse_max_concurrency(self.max_threads.as_deref()))
    }
}

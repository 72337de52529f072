//! Paths command

use clap::Args;
use serde::Serialize;
use tracing::info;

use pkgscope_core::monorepo::resolve_relevant_paths;
use pkgscope_core::{PackageDescriptor, PackagePath};
use pkgscope_git::GitVcs;

use crate::cli::output::{header, path_style};
use crate::cli::{Cli, OutputFormat};

/// Show the package paths commits are matched against
#[derive(Debug, Args)]
pub struct PathsCommand {}

#[derive(Debug, Serialize)]
struct PathsReport<'a> {
    package: &'a str,
    directory: String,
    paths: &'a [PackagePath],
}

impl PathsCommand {
    /// Execute the paths command
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing paths command");
        let cwd = std::env::current_dir()?;
        let descriptor = PackageDescriptor::find_nearest(&cwd)?;
        let vcs = GitVcs::new(&cwd);

        let paths = resolve_relevant_paths(&vcs, &descriptor).await?;

        match cli.format {
            OutputFormat::Json => {
                let report = PathsReport {
                    package: descriptor.display_name(),
                    directory: descriptor.directory.display().to_string(),
                    paths: &paths,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", header(descriptor.display_name()));
                }
                for path in &paths {
                    println!("  {}", path_style().apply_to(path));
                }
            }
        }

        Ok(())
    }
}

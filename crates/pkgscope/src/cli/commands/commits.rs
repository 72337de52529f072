//! Commits command

use std::sync::Arc;

use async_trait::async_trait;
use clap::Args;
use tracing::info;

use pkgscope_core::{
    Commit, OnlyPackageCommits, PackageDescriptor, ReleaseStep, StepContext,
};
use pkgscope_git::{GitRepo, GitVcs};

use crate::cli::output::{hash_style, ConsoleLogger};
use crate::cli::{Cli, OutputFormat};

/// List commits since the last release that touched this package
#[derive(Debug, Args)]
pub struct CommitsCommand {
    /// Revision to start after (default: latest release tag)
    #[arg(long, value_name = "REF")]
    pub since: Option<String>,

    /// Only consider release tags matching this regex (default: this package's
    /// `name@x.y.z` or `name-vx.y.z` tags)
    #[arg(long, value_name = "REGEX")]
    pub tag_pattern: Option<String>,

    /// Show the files each commit touched
    #[arg(long)]
    pub files: bool,
}

impl CommitsCommand {
    /// Execute the commits command
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(since = ?self.since, tag_pattern = ?self.tag_pattern, "executing commits command");
        let cwd = std::env::current_dir()?;
        let descriptor = PackageDescriptor::find_nearest(&cwd)?;

        let commits = self.candidate_commits(&GitRepo::discover(&cwd)?, &descriptor)?;

        let step = OnlyPackageCommits::new(PrintCommits, GitVcs::new(&cwd), descriptor)
            .with_options(cli.filter_options());
        let config = PrintConfig {
            format: cli.format,
            show_files: self.files,
        };
        let context = StepContext::new(commits, Arc::new(ConsoleLogger::new(cli.quiet)));

        step.run(&config, context).await?;
        Ok(())
    }

    /// Commits since `--since`, else since the package's latest release tag,
    /// else all
    fn candidate_commits(
        &self,
        repo: &GitRepo,
        descriptor: &PackageDescriptor,
    ) -> anyhow::Result<Vec<Commit>> {
        if let Some(since) = &self.since {
            return Ok(repo.commits_since(since)?);
        }

        let latest = match &self.tag_pattern {
            Some(pattern) => repo.find_latest_tag(Some(pattern))?,
            None => repo.find_latest_release(descriptor.name.as_deref())?,
        };

        match latest {
            Some(tag) => {
                info!(tag = %tag.name, "using latest release tag");
                Ok(repo.commits_since(&tag.commit_hash)?)
            }
            None => {
                info!("no release tag found, using full history");
                Ok(repo.all_commits()?)
            }
        }
    }
}

/// How [`PrintCommits`] renders its batch
#[derive(Debug, Clone, Copy)]
pub struct PrintConfig {
    format: OutputFormat,
    show_files: bool,
}

/// Downstream step that prints the commits it receives
pub struct PrintCommits;

#[async_trait]
impl ReleaseStep for PrintCommits {
    type Config = PrintConfig;
    type Output = usize;
    type Error = anyhow::Error;

    async fn run(&self, config: &PrintConfig, context: StepContext) -> anyhow::Result<usize> {
        let commits = context.commits;

        match config.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&commits)?);
            }
            OutputFormat::Text => {
                for commit in &commits {
                    println!(
                        "{} {}",
                        hash_style().apply_to(commit.short_hash()),
                        commit.subject
                    );
                    if config.show_files {
                        for file in &commit.files {
                            println!("    {file}");
                        }
                    }
                }
            }
        }

        Ok(commits.len())
    }
}

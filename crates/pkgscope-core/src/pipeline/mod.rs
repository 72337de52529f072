//! Host release pipeline contract
//!
//! A release pipeline is a chain of steps. Each step receives the pipeline
//! configuration and a context carrying the candidate commits and the host's
//! logger. [`OnlyPackageCommits`] decorates any step so that it only ever sees
//! the commits belonging to one package.

mod adapter;

pub use adapter::OnlyPackageCommits;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::ScopeError;
use crate::types::Commit;

/// Sink for human-readable progress lines supplied by the host
pub trait StepLogger: Send + Sync {
    /// Emit one log line
    fn log(&self, message: &str);
}

/// Logger that forwards host log lines to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StepLogger for TracingLogger {
    fn log(&self, message: &str) {
        info!(target: "pkgscope::pipeline", "{}", message);
    }
}

/// Inputs handed to a pipeline step
#[derive(Clone)]
pub struct StepContext {
    /// Candidate commits since the last release
    pub commits: Vec<Commit>,
    /// Host logger
    pub logger: Arc<dyn StepLogger>,
}

impl StepContext {
    /// Create a context
    pub fn new(commits: Vec<Commit>, logger: Arc<dyn StepLogger>) -> Self {
        Self { commits, logger }
    }

    /// Same logger, different commits
    pub fn with_commits(&self, commits: Vec<Commit>) -> Self {
        Self {
            commits,
            logger: Arc::clone(&self.logger),
        }
    }
}

impl std::fmt::Debug for StepContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("commits", &self.commits.len())
            .finish_non_exhaustive()
    }
}

/// One step of a release pipeline
#[async_trait]
pub trait ReleaseStep: Send + Sync {
    /// Step configuration supplied by the host
    type Config: Send + Sync;
    /// Value produced by the step
    type Output: Send;
    /// Error produced by the step; filtering failures convert into it
    type Error: From<ScopeError> + Send;

    /// Run the step
    async fn run(
        &self,
        config: &Self::Config,
        context: StepContext,
    ) -> Result<Self::Output, Self::Error>;
}

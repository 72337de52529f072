//! Async `VcsQuery` implementation backed by git2

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use pkgscope_core::error::GitError;
use pkgscope_core::vcs::VcsQuery;

use crate::repository::{GitRepo, Result};

/// Answers filter queries against the repository containing `start_dir`.
///
/// `git2::Repository` is not `Sync`, so every query opens its own handle on
/// the blocking pool. The caller bounds how many run at once.
#[derive(Debug, Clone)]
pub struct GitVcs {
    start_dir: PathBuf,
}

impl GitVcs {
    /// Query the repository that contains `start_dir`
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
        }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(GitRepo) -> Result<T> + Send + 'static,
    {
        let start_dir = self.start_dir.clone();
        tokio::task::spawn_blocking(move || f(GitRepo::discover(&start_dir)?))
            .await
            .map_err(|e| GitError::TaskFailed(e.to_string()))?
    }
}

#[async_trait]
impl VcsQuery for GitVcs {
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>> {
        let commit = commit.to_string();
        self.blocking(move |repo| repo.changed_files(&commit)).await
    }

    async fn repository_root(&self) -> Result<PathBuf> {
        let root = self.blocking(|repo| repo.root()).await?;
        debug!(root = %root.display(), "located repository root");
        Ok(root)
    }
}

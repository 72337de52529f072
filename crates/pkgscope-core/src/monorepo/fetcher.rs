//! Memoized, concurrency-bounded lookup of files changed per commit

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::try_join_all;
use tokio::sync::{OnceCell, Semaphore};
use tracing::{debug, instrument};

use crate::config::{validate_options, FilterOptions};
use crate::error::{GitError, Result, ScopeError};
use crate::types::Commit;
use crate::vcs::VcsQuery;

/// Shared, immutable file list for one commit
pub type FileList = Arc<[String]>;

/// Fetches changed-file lists for commits.
///
/// Each commit id is queried at most once per fetcher: concurrent callers for
/// the same id wait on the same cell. At most `max_concurrency` queries are
/// outstanding at any time; cache hits never take a permit.
pub struct FileFetcher<V> {
    vcs: V,
    permits: Semaphore,
    max_concurrency: usize,
    cache: Mutex<HashMap<String, Arc<OnceCell<FileList>>>>,
}

impl<V: VcsQuery> FileFetcher<V> {
    /// Create a fetcher allowing `max_concurrency` outstanding queries
    pub fn new(vcs: V, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            vcs,
            permits: Semaphore::new(max_concurrency),
            max_concurrency,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Create a fetcher from validated options
    pub fn from_options(vcs: V, options: &FilterOptions) -> Result<Self> {
        validate_options(options)?;
        Ok(Self::new(vcs, options.max_concurrency))
    }

    /// Configured concurrency bound
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Number of commit ids with a cache entry (pending or resolved)
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Files changed by `commit`, queried once and then served from cache
    pub async fn files_for(&self, commit: &str) -> Result<FileList> {
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(commit.to_string()).or_default())
        };

        let files = cell
            .get_or_try_init(|| self.query(commit))
            .await?;

        Ok(Arc::clone(files))
    }

    async fn query(&self, commit: &str) -> Result<FileList> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ScopeError::vcs_query(commit, GitError::TaskFailed(e.to_string())))?;

        let files = self
            .vcs
            .changed_files(commit)
            .await
            .map_err(|e| ScopeError::vcs_query(commit, e))?;

        debug!(commit, files = files.len(), "fetched changed files");
        Ok(FileList::from(files))
    }

    /// Attach file lists to every commit, keeping input order.
    ///
    /// The first failure aborts the batch; no partial result is returned.
    #[instrument(skip_all, fields(commits = commits.len(), max_concurrency = self.max_concurrency))]
    pub async fn with_files(&self, commits: Vec<Commit>) -> Result<Vec<Commit>> {
        try_join_all(commits.into_iter().map(|commit| async move {
            let files = self.files_for(&commit.hash).await?;
            Ok::<_, ScopeError>(commit.with_files(files.iter().cloned()))
        }))
        .await
    }
}

//! Shared fixtures for unit tests

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GitError;
use crate::vcs::VcsQuery;

/// In-memory VCS that records how it was queried
#[derive(Default)]
pub struct MockVcs {
    root: Option<PathBuf>,
    files: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: AtomicUsize,
    root_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    queried: Mutex<Vec<String>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_commit(mut self, hash: &str, files: &[&str]) -> Self {
        self.files.insert(
            hash.to_string(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    pub fn with_delay(mut self, hash: &str, delay: Duration) -> Self {
        self.delays.insert(hash.to_string(), delay);
        self
    }

    pub fn with_failure(mut self, hash: &str) -> Self {
        self.failing.insert(hash.to_string());
        self
    }

    /// Number of `changed_files` calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `repository_root` calls
    pub fn root_calls(&self) -> usize {
        self.root_calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous `changed_files` calls seen
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Commit ids in the order they were queried
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl VcsQuery for MockVcs {
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>, GitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(commit.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(commit)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(commit) {
            return Err(GitError::CommitNotFound(commit.to_string()));
        }

        self.files
            .get(commit)
            .cloned()
            .ok_or_else(|| GitError::CommitNotFound(commit.to_string()))
    }

    async fn repository_root(&self) -> Result<PathBuf, GitError> {
        self.root_calls.fetch_add(1, Ordering::SeqCst);
        self.root
            .clone()
            .ok_or_else(|| GitError::NotARepository(PathBuf::from("/nowhere")))
    }
}

//! Version control query seam

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GitError;

/// Queries the filter needs from version control.
///
/// Implementations must tolerate many concurrent calls; the caller bounds
/// how many are outstanding.
#[async_trait]
pub trait VcsQuery: Send + Sync {
    /// Repository-relative paths touched by a commit, in the order reported
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>, GitError>;

    /// Absolute path of the repository's working tree root
    async fn repository_root(&self) -> Result<PathBuf, GitError>;
}

#[async_trait]
impl<T: VcsQuery + ?Sized> VcsQuery for Arc<T> {
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>, GitError> {
        (**self).changed_files(commit).await
    }

    async fn repository_root(&self) -> Result<PathBuf, GitError> {
        (**self).repository_root().await
    }
}

#[async_trait]
impl<T: VcsQuery + ?Sized> VcsQuery for &T {
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>, GitError> {
        (**self).changed_files(commit).await
    }

    async fn repository_root(&self) -> Result<PathBuf, GitError> {
        (**self).repository_root().await
    }
}

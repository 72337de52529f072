//! Commit history and per-commit changed files

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use serde_json::json;
use tracing::{debug, instrument};

use pkgscope_core::error::GitError;
use pkgscope_core::types::Commit;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get commits reachable from HEAD but not from `since` (any revision)
    pub fn commits_since(&self, since: &str) -> Result<Vec<Commit>> {
        let since_oid = self
            .repo
            .revparse_single(since)
            .map_err(|_| GitError::ReferenceNotFound(since.to_string()))?
            .peel_to_commit()?
            .id();
        self.walk(Some(since_oid))
    }

    /// Get all commits on the current branch
    pub fn all_commits(&self) -> Result<Vec<Commit>> {
        self.walk(None)
    }

    fn walk(&self, hide: Option<Oid>) -> Result<Vec<Commit>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(oid) = hide {
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(to_commit(&commit));
        }

        debug!(count = commits.len(), "walked commit history");
        Ok(commits)
    }

    /// Repository-relative paths touched by a commit.
    ///
    /// `hash` may be any revision git understands, including abbreviated
    /// hashes and tag names.
    ///
    /// Compares the commit's tree with its parent's; a root commit is compared
    /// with the empty tree. Merge commits report no files. Deleted files are
    /// reported by their old path.
    #[instrument(skip(self))]
    pub fn changed_files(&self, hash: &str) -> Result<Vec<String>> {
        let commit = self
            .repo
            .revparse_single(hash)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => {
                    GitError::CommitNotFound(hash.to_string())
                }
                _ => GitError::Git2(e),
            })?
            .peel_to_commit()?;

        if commit.parent_count() > 1 {
            debug!(hash, "merge commit, no files reported");
            return Ok(Vec::new());
        }

        let commit_tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let files: Vec<String> = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();

        debug!(hash, files = files.len(), "listed changed files");
        Ok(files)
    }
}

/// Convert a git2 commit into the pipeline's commit type
fn to_commit(commit: &git2::Commit<'_>) -> Commit {
    let author = commit.author();
    let subject = commit.summary().unwrap_or("(no message)");

    let date = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let mut out = Commit::new(commit.id().to_string(), subject)
        .with_metadata(
            "author",
            json!({
                "name": author.name().unwrap_or("Unknown"),
                "email": author.email().unwrap_or("unknown@example.com"),
            }),
        )
        .with_metadata("date", date.to_rfc3339());

    if let Some(body) = commit.body() {
        out = out.with_metadata("body", body);
    }

    out
}

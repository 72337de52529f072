//! Commit relevance filtering

use tracing::{debug, warn};

use crate::types::Commit;

use super::paths::{normalized_segments, PackagePath};

/// Whether `file` lies under any of the relevant package paths
pub fn is_relevant(file: &str, relevant_paths: &[PackagePath]) -> bool {
    let Some(segments) = normalized_segments(file) else {
        return false;
    };

    relevant_paths
        .iter()
        .any(|path| path.contains_segments(&segments))
}

/// First file in `files` that lies under a relevant package path
pub fn matching_file<'a>(files: &'a [String], relevant_paths: &[PackagePath]) -> Option<&'a str> {
    files
        .iter()
        .map(String::as_str)
        .find(|file| is_relevant(file, relevant_paths))
}

/// Keep the commits that touched at least one file in a relevant package.
///
/// Commits must already carry their file lists. Input order is kept.
pub fn filter_commits(commits: Vec<Commit>, relevant_paths: &[PackagePath]) -> Vec<Commit> {
    if relevant_paths.is_empty() {
        warn!(
            commits = commits.len(),
            "no relevant package paths, dropping every commit"
        );
        return Vec::new();
    }

    commits
        .into_iter()
        .filter(|commit| match matching_file(&commit.files, relevant_paths) {
            Some(file) => {
                debug!(
                    commit = commit.short_hash(),
                    subject = %commit.subject,
                    file,
                    "including commit because it modified a package file"
                );
                true
            }
            None => false,
        })
        .collect()
}

//! Scoping commits to one package of a monorepo
//!
//! This module decides which commits belong to the package being released:
//! - Resolution of the package path relative to the repository root
//! - Extra include paths from the package's settings block
//! - Memoized, concurrency-bounded changed-file lookup per commit
//! - Segment-prefix matching of changed files against package paths

pub mod fetcher;
pub mod filter;
pub mod paths;
pub mod resolver;

pub use fetcher::{FileFetcher, FileList};
pub use filter::{filter_commits, is_relevant, matching_file};
pub use paths::{normalized_segments, PackagePath};
pub use resolver::{relative_package_path, resolve_relevant_paths};

use tracing::debug;

use crate::config::FilterOptions;
use crate::error::Result;
use crate::package::PackageDescriptor;
use crate::types::Commit;
use crate::vcs::VcsQuery;

/// Reduce `commits` to those touching the described package.
///
/// Resolves the relevant paths once, fetches file lists for the whole batch
/// with a fresh per-run cache, then filters. Fails as a whole on any error.
pub async fn only_package_commits<V>(
    vcs: &V,
    descriptor: &PackageDescriptor,
    options: &FilterOptions,
    commits: Vec<Commit>,
) -> Result<Vec<Commit>>
where
    V: VcsQuery + ?Sized,
{
    let relevant = resolve_relevant_paths(vcs, descriptor).await?;
    let fetcher = FileFetcher::from_options(vcs, options)?;

    debug!(commits = commits.len(), "fetching changed files");
    let enriched = fetcher.with_files(commits).await?;

    Ok(filter_commits(enriched, &relevant))
}

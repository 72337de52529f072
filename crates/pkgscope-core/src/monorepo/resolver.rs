//! Resolution of the relevant-package set for a run

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::{ResolutionError, Result};
use crate::package::PackageDescriptor;
use crate::vcs::VcsQuery;

use super::paths::PackagePath;

/// Package root relative to the repository root.
///
/// Both paths are canonicalized first so symlinked temp directories and
/// trailing separators compare equal.
pub fn relative_package_path(repo_root: &Path, package_dir: &Path) -> Result<PackagePath> {
    let canonical = |path: &Path| {
        std::fs::canonicalize(path).map_err(|source| ResolutionError::Directory {
            path: path.to_path_buf(),
            source,
        })
    };

    let root = canonical(repo_root)?;
    let package = canonical(package_dir)?;

    let outside = || ResolutionError::OutsideRepository {
        package: package.clone(),
        repository: root.clone(),
    };

    let relative = package.strip_prefix(&root).map_err(|_| outside())?;
    let path = PackagePath::from_relative(relative).ok_or_else(outside)?;
    Ok(path)
}

/// Compute the package's own path followed by its configured include paths.
///
/// The repository root is queried first; if that fails nothing else runs.
/// Include paths that are absolute or leave the repository are skipped since
/// they can never match a repository-relative file.
#[instrument(skip_all, fields(package = descriptor.display_name()))]
pub async fn resolve_relevant_paths<V>(vcs: &V, descriptor: &PackageDescriptor) -> Result<Vec<PackagePath>>
where
    V: VcsQuery + ?Sized,
{
    let repo_root = vcs
        .repository_root()
        .await
        .map_err(ResolutionError::RepositoryRoot)?;
    debug!(root = %repo_root.display(), "resolved repository root");

    // A package at the repository root resolves to the empty path, which
    // owns every file rather than none.
    let own = relative_package_path(&repo_root, &descriptor.directory)?;
    let mut paths = vec![own];

    for raw in &descriptor.settings.include_paths {
        match PackagePath::parse(raw) {
            Some(path) if !paths.contains(&path) => paths.push(path),
            Some(_) => debug!(path = raw.as_str(), "skipping duplicate include path"),
            None => warn!(
                path = raw.as_str(),
                "include path is not inside the repository and will never match"
            ),
        }
    }

    info!(
        paths = %paths.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        "resolved relevant package paths"
    );
    Ok(paths)
}

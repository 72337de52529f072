//! pkgscope core - scope a release's commits to one monorepo package
//!
//! This crate provides the error types, configuration, package descriptor
//! lookup, and the commit relevance filter used by the pkgscope CLI and by
//! any release pipeline that embeds it.

pub mod config;
pub mod error;
pub mod monorepo;
pub mod package;
pub mod pipeline;
pub mod types;
pub mod vcs;

#[cfg(test)]
mod test_support;

pub use config::FilterOptions;
pub use error::{GitError, Result, ScopeError};
pub use monorepo::{only_package_commits, FileFetcher, PackagePath};
pub use package::{PackageDescriptor, ScopeSettings};
pub use pipeline::{OnlyPackageCommits, ReleaseStep, StepContext, StepLogger, TracingLogger};
pub use types::Commit;
pub use vcs::VcsQuery;

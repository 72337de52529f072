//! pkgscope Git - git queries for commit scoping
//!
//! This crate provides repository discovery, commit history, per-commit
//! changed-file lists, release tag lookup, and the async [`GitVcs`] adapter
//! the core filter queries.

mod commits;
mod repository;
mod tags;
pub mod types;
mod vcs;

#[cfg(test)]
mod test_support;

pub use repository::{GitRepo, Result};
pub use types::TagInfo;
pub use vcs::GitVcs;

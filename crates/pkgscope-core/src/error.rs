//! Error types for pkgscope

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ScopeError
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Main error type for pkgscope operations
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Repository or package root could not be determined
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A single commit's file list could not be retrieved
    #[error("Failed to list files changed by commit {commit}: {source}")]
    VcsQuery {
        commit: String,
        #[source]
        source: GitError,
    },

    /// Package descriptor problems
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScopeError {
    /// Wrap a git failure for the given commit
    pub fn vcs_query(commit: impl Into<String>, source: GitError) -> Self {
        Self::VcsQuery {
            commit: commit.into(),
            source,
        }
    }
}

/// Errors locating the repository root or the package root
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The version control system could not report a repository root
    #[error("Could not determine repository root: {0}")]
    RepositoryRoot(#[source] GitError),

    /// A directory could not be resolved on disk
    #[error("Could not resolve directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The package lives outside the repository
    #[error("Package directory {package} is not inside repository {repository}")]
    OutsideRepository {
        package: PathBuf,
        repository: PathBuf,
    },
}

/// Package descriptor errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No descriptor found walking upward from the start directory
    #[error("No package.json found in {0} or any parent directory")]
    NotFound(PathBuf),

    /// Descriptor exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor could not be parsed
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Settings block has the wrong shape
    #[error("Invalid \"{key}\" settings in {path}: {message}")]
    InvalidSettings {
        key: String,
        path: PathBuf,
        message: String,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Bare repositories have no working tree to scope packages in
    #[error("Repository at {0} has no working directory")]
    BareRepository(PathBuf),

    /// Commit not found
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    /// Reference could not be resolved
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// Invalid tag pattern
    #[error("Invalid tag pattern '{pattern}': {reason}")]
    InvalidTagPattern { pattern: String, reason: String },

    /// Blocking git task was cancelled or panicked
    #[error("Git task failed: {0}")]
    TaskFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

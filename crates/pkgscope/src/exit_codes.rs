//! Exit codes for the CLI

use pkgscope_core::error::{ResolutionError, ScopeError};
use pkgscope_core::GitError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration or package descriptor error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }

    match err.downcast_ref::<ScopeError>() {
        Some(ScopeError::Metadata(_) | ScopeError::Config(_)) => CONFIG_ERROR,
        Some(ScopeError::VcsQuery { .. })
        | Some(ScopeError::Resolution(ResolutionError::RepositoryRoot(_))) => GIT_ERROR,
        Some(ScopeError::Resolution(_)) => CONFIG_ERROR,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgscope_core::error::MetadataError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_mapping() {
        let metadata: anyhow::Error =
            ScopeError::from(MetadataError::NotFound(PathBuf::from("/x"))).into();
        assert_eq!(for_error(&metadata), CONFIG_ERROR);

        let vcs: anyhow::Error =
            ScopeError::vcs_query("abc", GitError::CommitNotFound("abc".into())).into();
        assert_eq!(for_error(&vcs), GIT_ERROR);

        let git: anyhow::Error = GitError::NotARepository(PathBuf::from("/x")).into();
        assert_eq!(for_error(&git), GIT_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("other")), ERROR);
    }
}

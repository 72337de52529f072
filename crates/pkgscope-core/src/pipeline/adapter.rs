//! Decorator that narrows a step's commits to one package

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::FilterOptions;
use crate::monorepo::only_package_commits;
use crate::package::PackageDescriptor;
use crate::vcs::VcsQuery;

use super::{ReleaseStep, StepContext};

/// Wraps a downstream step so it only receives the package's commits.
///
/// The package descriptor is passed in explicitly rather than read from the
/// working directory at call time.
pub struct OnlyPackageCommits<S, V> {
    inner: S,
    vcs: V,
    descriptor: PackageDescriptor,
    options: FilterOptions,
}

impl<S, V> OnlyPackageCommits<S, V>
where
    S: ReleaseStep,
    V: VcsQuery,
{
    /// Wrap `inner`, taking filter options from the environment
    pub fn new(inner: S, vcs: V, descriptor: PackageDescriptor) -> Self {
        Self {
            inner,
            vcs,
            descriptor,
            options: FilterOptions::from_env(),
        }
    }

    /// Replace the filter options
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// The wrapped step
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Options the next run will use
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }
}

#[async_trait]
impl<S, V> ReleaseStep for OnlyPackageCommits<S, V>
where
    S: ReleaseStep,
    V: VcsQuery,
{
    type Config = S::Config;
    type Output = S::Output;
    type Error = S::Error;

    #[instrument(skip_all, fields(package = self.descriptor.display_name(), commits = context.commits.len()))]
    async fn run(
        &self,
        config: &Self::Config,
        mut context: StepContext,
    ) -> Result<Self::Output, Self::Error> {
        let commits = std::mem::take(&mut context.commits);
        let filtered =
            only_package_commits(&self.vcs, &self.descriptor, &self.options, commits).await?;

        context.logger.log(&format!(
            "Found {} commits for package {} since last release",
            filtered.len(),
            self.descriptor.display_name()
        ));
        debug!(retained = filtered.len(), "forwarding filtered commits");

        self.inner
            .run(config, context.with_commits(filtered))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::pipeline::StepLogger;
    use crate::test_support::MockVcs;
    use crate::types::Commit;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Debug)]
    enum StepError {
        Scope(ScopeError),
        Downstream(String),
    }

    impl From<ScopeError> for StepError {
        fn from(e: ScopeError) -> Self {
            Self::Scope(e)
        }
    }

    /// Returns the hashes it was given, or fails when configured to
    struct RecordingStep;

    #[async_trait]
    impl ReleaseStep for RecordingStep {
        type Config = bool;
        type Output = Vec<String>;
        type Error = StepError;

        async fn run(&self, fail: &bool, context: StepContext) -> Result<Vec<String>, StepError> {
            if *fail {
                return Err(StepError::Downstream("boom".into()));
            }
            Ok(context.commits.into_iter().map(|c| c.hash).collect())
        }
    }

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<String>>);

    impl StepLogger for RecordingLogger {
        fn log(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn fixture(name: Option<&str>) -> (TempDir, MockVcs, PackageDescriptor) {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("packages/a");
        std::fs::create_dir_all(&pkg).unwrap();
        let vcs = MockVcs::new()
            .with_root(temp.path())
            .with_commit("c1", &["packages/a/index.js"])
            .with_commit("c2", &["packages/b/index.js"])
            .with_commit("c3", &["packages/a/index.js", "readme.md"]);
        let descriptor = PackageDescriptor::new(pkg, name.map(str::to_string));
        (temp, vcs, descriptor)
    }

    fn batch() -> Vec<Commit> {
        vec![
            Commit::new("c1", "feat: a"),
            Commit::new("c2", "feat: b"),
            Commit::new("c3", "feat: both"),
        ]
    }

    #[tokio::test]
    async fn test_forwards_filtered_commits_and_logs_count() {
        let (_temp, vcs, descriptor) = fixture(Some("@acme/a"));
        let logger = Arc::new(RecordingLogger::default());
        let step = OnlyPackageCommits::new(RecordingStep, &vcs, descriptor)
            .with_options(FilterOptions::new().with_max_concurrency(2));

        let output = step
            .run(&false, StepContext::new(batch(), logger.clone()))
            .await
            .unwrap();

        assert_eq!(output, ["c1", "c3"]);
        assert_eq!(step.options().max_concurrency, 2);
        assert_eq!(
            logger.0.lock().unwrap().as_slice(),
            ["Found 2 commits for package @acme/a since last release"]
        );
    }

    #[tokio::test]
    async fn test_placeholder_name_in_log() {
        let (_temp, vcs, descriptor) = fixture(None);
        let logger = Arc::new(RecordingLogger::default());
        let step = OnlyPackageCommits::new(RecordingStep, &vcs, descriptor);

        step.run(&false, StepContext::new(batch(), logger.clone()))
            .await
            .unwrap();

        let lines = logger.0.lock().unwrap();
        assert!(lines[0].contains("(unnamed package)"));
    }

    #[tokio::test]
    async fn test_downstream_error_returned_unchanged() {
        let (_temp, vcs, descriptor) = fixture(Some("a"));
        let step = OnlyPackageCommits::new(RecordingStep, &vcs, descriptor);

        let err = step
            .run(&true, StepContext::new(batch(), Arc::new(RecordingLogger::default())))
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::Downstream(ref m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_filter_failure_skips_downstream() {
        let (_temp, _, descriptor) = fixture(Some("a"));
        let vcs = MockVcs::new(); // no repository root
        let logger = Arc::new(RecordingLogger::default());
        let step = OnlyPackageCommits::new(RecordingStep, &vcs, descriptor);

        let err = step
            .run(&false, StepContext::new(batch(), logger.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::Scope(ScopeError::Resolution(_))));
        assert!(logger.0.lock().unwrap().is_empty());
        assert_eq!(vcs.calls(), 0);
    }
}

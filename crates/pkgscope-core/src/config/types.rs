//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_MAX_CONCURRENCY, MAX_THREADS_ENV};
use super::loader::parse_max_concurrency;

/// Options for one filtering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Maximum number of outstanding git queries
    pub max_concurrency: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl FilterOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the concurrency bound taken from `PKGSCOPE_MAX_THREADS`.
    ///
    /// Unset or invalid values give the default bound.
    pub fn from_env() -> Self {
        let raw = std::env::var(MAX_THREADS_ENV).ok();
        Self::new().with_max_concurrency(parse_max_concurrency(raw.as_deref()))
    }

    /// Set the concurrency bound
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

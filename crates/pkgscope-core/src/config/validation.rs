//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::FilterOptions;

/// Validate filter options
pub fn validate_options(options: &FilterOptions) -> Result<()> {
    if options.max_concurrency == 0 {
        return Err(ConfigError::InvalidValue {
            field: "max_concurrency".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into());
    }

    debug!(max_concurrency = options.max_concurrency, "filter options valid");
    Ok(())
}

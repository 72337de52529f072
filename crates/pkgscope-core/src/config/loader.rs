//! Configuration loading

use tracing::warn;

use super::defaults::DEFAULT_MAX_CONCURRENCY;

/// Coerce a textual concurrency setting.
///
/// Missing, non-numeric and non-positive values fall back to
/// [`DEFAULT_MAX_CONCURRENCY`].
pub fn parse_max_concurrency(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_MAX_CONCURRENCY;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(DEFAULT_MAX_CONCURRENCY),
        _ => {
            warn!(
                value = raw,
                default = DEFAULT_MAX_CONCURRENCY,
                "ignoring invalid concurrency setting"
            );
            DEFAULT_MAX_CONCURRENCY
        }
    }
}

//! Git types

use semver::Version;
use serde::Serialize;

/// A release tag and the commit it marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// Tag name without `refs/tags/`
    pub name: String,
    /// Hash of the tagged commit
    pub commit_hash: String,
    /// Version parsed from the tag name, if it carries one
    pub version: Option<Version>,
}

impl TagInfo {
    /// Create a tag, parsing its version from the name
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = version_from_tag(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            version,
        }
    }
}

/// Parse the version out of a release tag name.
///
/// Understands `1.2.3`, `v1.2.3`, `name@1.2.3` (including scoped npm names
/// such as `@acme/a@1.2.3`) and `name-v1.2.3`.
pub fn version_from_tag(tag: &str) -> Option<Version> {
    let candidate = match tag.rfind('@') {
        Some(pos) if pos > 0 => &tag[pos + 1..],
        _ => match tag.rfind("-v") {
            Some(pos) => &tag[pos + 2..],
            None => tag,
        },
    };

    let candidate = candidate.strip_prefix('v').unwrap_or(candidate);
    Version::parse(candidate).ok()
}

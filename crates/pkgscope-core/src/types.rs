//! Core types for pkgscope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate commit handed over by the release pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Full revision hash
    pub hash: String,

    /// First line of the commit message
    pub subject: String,

    /// Files touched by the commit, filled in during filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Everything else the host attached, passed through untouched
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Commit {
    /// Create a new commit
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            files: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach the changed-file list
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash() {
        let commit = Commit::new("abc1234567890", "feat: add feature");
        assert_eq!(commit.short_hash(), "abc1234");

        let short = Commit::new("abc", "fix: tiny");
        assert_eq!(short.short_hash(), "abc");
    }

    #[test]
    fn test_metadata_passes_through_serde() {
        let json = r#"{
            "hash": "deadbeef",
            "subject": "fix: thing",
            "author": {"name": "Jo", "email": "jo@example.com"},
            "gitTags": "(tag: v1.0.0)"
        }"#;

        let commit: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.hash, "deadbeef");
        assert!(commit.files.is_empty());
        assert_eq!(commit.metadata["gitTags"], "(tag: v1.0.0)");

        let back = serde_json::to_value(&commit).unwrap();
        assert_eq!(back["author"]["email"], "jo@example.com");
        assert!(back.get("files").is_none());
    }
}

//! Repository-relative package paths and segment-prefix matching

use std::fmt;
use std::path::{Component, Path};

use serde::{Serialize, Serializer};

/// Split a path into normalized segments.
///
/// Both `/` and `\` separate segments. Empty and `.` segments are dropped and
/// `..` removes the previous segment. Returns `None` for absolute paths and
/// for paths that climb above their starting point.
pub fn normalized_segments(raw: &str) -> Option<Vec<&str>> {
    if is_absolute(raw) {
        return None;
    }

    let mut segments = Vec::new();
    for segment in raw.split(|c: char| c == '/' || c == '\\') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments)
}

fn is_absolute(raw: &str) -> bool {
    if raw.starts_with('/') || raw.starts_with('\\') {
        return true;
    }

    // Windows drive prefix, e.g. `C:\` or `C:/`
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// A directory inside the repository that makes up one logical package.
///
/// Zero segments means the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackagePath {
    segments: Vec<String>,
}

impl PackagePath {
    /// The repository root
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a repository-relative path string
    pub fn parse(raw: &str) -> Option<Self> {
        let segments = normalized_segments(raw)?;
        Some(Self {
            segments: segments.into_iter().map(str::to_string).collect(),
        })
    }

    /// Build from a relative filesystem path (already stripped of the root)
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut segments: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir => {
                    segments.pop()?;
                }
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(Self { segments })
    }

    /// Path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the repository root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the already-normalized file segments lie under this path
    pub fn contains_segments(&self, file: &[&str]) -> bool {
        file.len() >= self.segments.len()
            && self
                .segments
                .iter()
                .zip(file)
                .all(|(package, file)| package == file)
    }

    /// Whether a repository-relative file path lies under this path
    pub fn contains(&self, file: &str) -> bool {
        normalized_segments(file).is_some_and(|segments| self.contains_segments(&segments))
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.segments.join("/"))
        }
    }
}

impl Serialize for PackagePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

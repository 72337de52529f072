//! Package descriptor (`package.json`) lookup

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::{DESCRIPTOR_FILE, SETTINGS_KEY};
use crate::error::{MetadataError, Result};

/// Settings block read from the descriptor under [`SETTINGS_KEY`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScopeSettings {
    /// Extra repository-relative paths treated as part of the package
    #[serde(default)]
    pub include_paths: Vec<String>,
}

/// The nearest package descriptor and the bits of it the filter needs
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Directory containing the descriptor (the package root)
    pub directory: PathBuf,
    /// Declared package name
    pub name: Option<String>,
    /// This tool's settings block, defaulted when absent
    pub settings: ScopeSettings,
}

impl PackageDescriptor {
    /// Create a descriptor directly, bypassing the filesystem
    pub fn new(directory: impl Into<PathBuf>, name: Option<String>) -> Self {
        Self {
            directory: directory.into(),
            name,
            settings: ScopeSettings::default(),
        }
    }

    /// Replace the settings block
    pub fn with_settings(mut self, settings: ScopeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load a descriptor file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| MetadataError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        let name = manifest
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let settings = match manifest.get(SETTINGS_KEY) {
            None | Some(Value::Null) => ScopeSettings::default(),
            Some(block) => ScopeSettings::deserialize(block).map_err(|e| {
                MetadataError::InvalidSettings {
                    key: SETTINGS_KEY.to_string(),
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?,
        };

        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        debug!(
            path = %path.display(),
            name = ?name,
            include_paths = settings.include_paths.len(),
            "loaded package descriptor"
        );

        Ok(Self {
            directory,
            name,
            settings,
        })
    }

    /// Find and load the nearest descriptor at or above `start_dir`
    pub fn find_nearest(start_dir: &Path) -> Result<Self> {
        let path = find_descriptor(start_dir)
            .ok_or_else(|| MetadataError::NotFound(start_dir.to_path_buf()))?;
        Self::load(&path)
    }

    /// Name to show in log lines
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or(crate::config::UNNAMED_PACKAGE)
    }
}

/// Walk parent directories looking for a descriptor file
pub fn find_descriptor(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for package descriptor");
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(DESCRIPTOR_FILE);
        if candidate.is_file() {
            info!(path = %candidate.display(), "found package descriptor");
            return Some(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no package descriptor found");
    None
}

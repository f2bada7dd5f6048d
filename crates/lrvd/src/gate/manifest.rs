//! Minimum `lerobot` release, read from the build manifest

use std::fmt;
use std::path::{Path, PathBuf};

/// Manifest file name at the installation root
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Key path of the requirement inside the manifest
pub const REQUIREMENT_KEY_PATH: [&str; 4] = ["tool", "lrvd", "requirements", "lerobot"];

/// Requirement used whenever the manifest cannot supply one
pub const DEFAULT_REQUIREMENT: &str = "0.2.0";

/// Minimum acceptable dependency release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement(String);

impl VersionRequirement {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the requirement from a manifest file, falling back to
    /// [`DEFAULT_REQUIREMENT`] on any failure
    pub fn from_manifest(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_from_manifest(path) {
            Ok(requirement) => requirement,
            Err(e) => {
                log::debug!(
                    "Using default lerobot requirement {}: {}",
                    DEFAULT_REQUIREMENT,
                    e
                );
                Self::default()
            }
        }
    }

    /// Read the requirement from a manifest file
    pub fn try_from_manifest(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_manifest(&content)
    }

    /// Extract the requirement from manifest TOML text
    pub fn parse_manifest(content: &str) -> Result<Self, ManifestError> {
        let document: toml::Value = toml::from_str(content)?;

        let mut value = &document;
        for key in REQUIREMENT_KEY_PATH {
            value = value
                .get(key)
                .ok_or_else(|| ManifestError::MissingKey(REQUIREMENT_KEY_PATH.join(".")))?;
        }

        value
            .as_str()
            .map(Self::new)
            .ok_or_else(|| ManifestError::NotAString(REQUIREMENT_KEY_PATH.join(".")))
    }
}

impl Default for VersionRequirement {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIREMENT)
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default manifest location: `<installation root>/pyproject.toml`, where the
/// installation root is the parent of the directory holding the executable
pub fn default_manifest_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let root = exe.parent()?.parent()?;
    Some(root.join(MANIFEST_FILE))
}

/// Reasons the manifest could not supply a requirement
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Manifest has no '{0}' entry")]
    MissingKey(String),

    #[error("Manifest entry '{0}' is not a string")]
    NotAString(String),
}

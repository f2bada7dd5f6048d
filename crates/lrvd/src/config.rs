//! Launcher settings
//!
//! Optional YAML file describing the local environment:
//!
//! ```yaml
//! python: /opt/lerobot/venv/bin/python
//! manifest: /opt/lrvd/pyproject.toml
//! daemon:
//!   program: /opt/lerobot/venv/bin/python
//!   args: ["-m", "lrv.daemon"]
//!   env:
//!     HF_LEROBOT_HOME: /data/lerobot
//! ```

use crate::daemon::DaemonCommand;
use crate::gate::{default_manifest_path, DEFAULT_PYTHON};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit settings file
pub const CONFIG_ENV: &str = "LRVD_CONFIG";
/// Overrides the probing interpreter
pub const PYTHON_ENV: &str = "LRVD_PYTHON";
/// Overrides the build manifest location
pub const MANIFEST_ENV: &str = "LRVD_MANIFEST";
/// Overrides the daemon program; the daemon then gets only the configured args
pub const DAEMON_ENV: &str = "LRVD_DAEMON";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSettings {
    /// Interpreter used to probe for lerobot
    #[serde(default)]
    pub python: Option<String>,

    /// Build manifest holding the lerobot requirement
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Daemon process to hand the session to
    #[serde(default)]
    pub daemon: DaemonCommand,
}

impl LauncherSettings {
    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Settings file location: `$LRVD_CONFIG`, else `~/.lrvd/launcher.yaml`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".lrvd").join("launcher.yaml"))
    }

    /// Load the settings file if present, then apply environment overrides.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading launcher settings from {}", path.display());
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply `LRVD_*` overrides from a variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(python) = lookup(PYTHON_ENV) {
            self.python = Some(python);
        }
        if let Some(manifest) = lookup(MANIFEST_ENV) {
            self.manifest = Some(PathBuf::from(manifest));
        }
        if let Some(program) = lookup(DAEMON_ENV) {
            self.daemon.program = Some(program);
        }
    }

    pub fn python(&self) -> &str {
        self.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// Configured manifest path, else the installation default
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.manifest.clone().or_else(default_manifest_path)
    }
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

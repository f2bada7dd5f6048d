//! Detection of the installed `lerobot` library

use std::process::{Command, Stdio};

/// Importable module name of the robotics library
pub const DEPENDENCY_MODULE: &str = "lerobot";

/// Distribution name the library is registered under
pub const DEPENDENCY_DISTRIBUTION: &str = "lerobot";

/// Default interpreter used for probing
pub const DEFAULT_PYTHON: &str = "python3";

/// Source of truth for the installed dependency.
///
/// `None` from a version query means that source could not tell.
pub trait DependencyProbe {
    /// Whether the module can be loaded at all
    fn is_installed(&self) -> bool;

    /// Version recorded by the package registry for the distribution
    fn distribution_version(&self) -> Option<String>;

    /// Version attribute exposed by the loaded module
    fn module_version(&self) -> Option<String>;
}

/// Probes a Python environment by running short snippets in its interpreter
#[derive(Debug, Clone)]
pub struct PythonProbe {
    pub interpreter: String,
    pub module: String,
    pub distribution: String,
}

impl PythonProbe {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            module: DEPENDENCY_MODULE.to_string(),
            distribution: DEPENDENCY_DISTRIBUTION.to_string(),
        }
    }

    /// Run `interpreter -c <code>`; stdout is returned on a zero exit status
    fn run(&self, code: &str) -> Option<String> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(code)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                log::debug!(
                    "[{}] Probe exited with {}: {}",
                    self.interpreter,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                None
            }
            Err(e) => {
                log::debug!("[{}] Failed to spawn interpreter: {}", self.interpreter, e);
                None
            }
        }
    }

    /// Like [`run`](Self::run), keeping only a non-empty trimmed result
    fn query(&self, code: &str) -> Option<String> {
        self.run(code)
            .map(|out| out.trim().to_string())
            .filter(|out| !out.is_empty())
    }
}

impl Default for PythonProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

impl DependencyProbe for PythonProbe {
    fn is_installed(&self) -> bool {
        self.run(&format!("import {}", self.module)).is_some()
    }

    fn distribution_version(&self) -> Option<String> {
        self.query(&format!(
            "from importlib.metadata import version; print(version({:?}))",
            self.distribution
        ))
    }

    fn module_version(&self) -> Option<String> {
        self.query(&format!(
            "import {m}; v = getattr({m}, '__version__', None); print(v if v is not None else '')",
            m = self.module
        ))
    }
}

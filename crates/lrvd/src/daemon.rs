//! Handoff to the external control-loop daemon
//!
//! The daemon receives the session as JSON in [`SESSION_CONFIG_ENV`]. On Unix
//! the launcher process is replaced by the daemon; elsewhere the daemon runs
//! as a child and the launcher exits with its status.

use crate::session::SessionConfiguration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::process::Command;

/// Environment variable carrying the serialized session
pub const SESSION_CONFIG_ENV: &str = "LRVD_SESSION_CONFIG";

fn default_args() -> Vec<String> {
    vec!["-m".to_string(), "lrv.daemon".to_string()]
}

/// How to start the daemon process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonCommand {
    /// Executable; the probing interpreter when unset
    pub program: Option<String>,
    /// Arguments passed before anything else. When unset, `-m lrv.daemon` is
    /// used with the default interpreter and nothing with a configured program.
    pub args: Option<Vec<String>>,
    /// Extra environment for the daemon
    pub env: HashMap<String, String>,
}

impl Default for DaemonCommand {
    fn default() -> Self {
        Self {
            program: None,
            args: None,
            env: HashMap::new(),
        }
    }
}

impl DaemonCommand {
    /// Fill in the program with `python` (running the daemon module) if none
    /// was configured
    pub fn with_default_program(mut self, python: &str) -> Self {
        if self.program.is_none() {
            self.args = Some(self.args());
            self.program = Some(python.to_string());
        }
        self
    }

    pub fn program(&self) -> &str {
        self.program
            .as_deref()
            .unwrap_or(crate::gate::DEFAULT_PYTHON)
    }

    pub fn args(&self) -> Vec<String> {
        match (&self.args, &self.program) {
            (Some(args), _) => args.clone(),
            (None, None) => default_args(),
            (None, Some(_)) => Vec::new(),
        }
    }

    /// Build the process invocation for `config`
    pub fn build(&self, config: &SessionConfiguration) -> Result<Command, DaemonError> {
        let session = config.to_json().map_err(DaemonError::Serialize)?;

        let mut cmd = Command::new(self.program());
        cmd.args(self.args())
            .envs(&self.env)
            .env(SESSION_CONFIG_ENV, session);
        Ok(cmd)
    }
}

/// Start the daemon with `config`. Only returns if the handoff failed.
pub fn run_daemon(config: SessionConfiguration, command: &DaemonCommand) -> DaemonError {
    let mut cmd = match command.build(&config) {
        Ok(cmd) => cmd,
        Err(e) => return e,
    };

    log::info!(
        "Starting daemon as {} ({}): {} {}",
        config.poste,
        config.mode,
        command.program(),
        command.args().join(" ")
    );

    exec(&mut cmd, command.program())
}

#[cfg(unix)]
fn exec(cmd: &mut Command, program: &str) -> DaemonError {
    use std::os::unix::process::CommandExt;

    let source = cmd.exec();
    DaemonError::Exec {
        program: program.to_string(),
        source,
    }
}

#[cfg(not(unix))]
fn exec(cmd: &mut Command, program: &str) -> DaemonError {
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => DaemonError::Exec {
            program: program.to_string(),
            source,
        },
    }
}

/// Errors that can occur handing off to the daemon
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("Failed to serialize session configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to start daemon '{program}': {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

//! Command-line interface for lrvd
//!
//! Operators address the two device sections with dotted flags
//! (`--teleop.port`, `--robot.cameras`). argh long names cannot contain dots,
//! so the schema uses dashed names and [`normalize_args`] rewrites dotted
//! spellings before parsing. Both spellings are accepted.

use crate::session::{
    LogLevel, Poste, RobotConfig, SessionConfiguration, TeleopConfig, DEFAULT_FPS, DEFAULT_MODE,
    DEFAULT_ROBOT_PORT, DEFAULT_ROBOT_TYPE, DEFAULT_TELEOP_PORT, DEFAULT_TELEOP_TYPE,
};
use argh::FromArgs;
use std::collections::HashSet;

/// Name used in usage output
pub const COMMAND_NAME: &str = "lrvd";

/// LRV daemon - LeRobo-Vous robot telepresence
#[derive(FromArgs, Debug, PartialEq)]
pub struct SessionArgs {
    /// mode: 'teleop' (control robots) or 'robot' (be controlled)
    #[argh(option)]
    pub poste: Poste,

    /// session mode (default: solo)
    #[argh(option, default = "String::from(DEFAULT_MODE)")]
    pub mode: String,

    /// teleoperator type (default: so101_leader)
    #[argh(option, default = "String::from(DEFAULT_TELEOP_TYPE)")]
    pub teleop_type: String,

    /// teleoperator port (default: /dev/ttyACM_LEADER)
    #[argh(option, default = "String::from(DEFAULT_TELEOP_PORT)")]
    pub teleop_port: String,

    /// teleoperator ID
    #[argh(option)]
    pub teleop_id: Option<String>,

    /// robot ID
    #[argh(option)]
    pub robot_id: Option<String>,

    /// robot type (default: so101_follower)
    #[argh(option, default = "String::from(DEFAULT_ROBOT_TYPE)")]
    pub robot_type: String,

    /// robot port (default: /dev/ttyACM_FOLLOWER)
    #[argh(option, default = "String::from(DEFAULT_ROBOT_PORT)")]
    pub robot_port: String,

    /// full camera config dict as JSON
    #[argh(option)]
    pub robot_cameras: Option<String>,

    /// control loop FPS (default: 30)
    #[argh(option, default = "DEFAULT_FPS")]
    pub fps: i64,

    /// clear saved device credentials
    #[argh(switch)]
    pub reset_secret: bool,

    /// logging level: DEBUG, INFO, WARNING or ERROR (default: INFO)
    #[argh(option, default = "LogLevel::Info")]
    pub log_level: LogLevel,
}

impl From<SessionArgs> for SessionConfiguration {
    fn from(args: SessionArgs) -> Self {
        Self {
            poste: args.poste,
            mode: args.mode,
            teleop: TeleopConfig {
                device_type: args.teleop_type,
                port: args.teleop_port,
                id: args.teleop_id,
            },
            robot: RobotConfig {
                device_type: args.robot_type,
                port: args.robot_port,
                id: args.robot_id,
                cameras: args.robot_cameras,
            },
            fps: args.fps,
            reset_secret: args.reset_secret,
            log_level: args.log_level,
        }
    }
}

/// Argument parsing stopped before a configuration was produced
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    /// `--help` was requested; carries the usage text
    #[error("{0}")]
    Help(String),

    /// The command line violated the schema; carries the usage diagnostic
    #[error("{0}")]
    Invalid(String),
}

impl ArgumentError {
    /// Process exit status matching the outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgumentError::Help(_) => 0,
            ArgumentError::Invalid(_) => 1,
        }
    }
}

/// Rewrite dotted long flags, split `--flag=value` tokens and map `-h` to
/// `--help`.
///
/// Tokens after a bare `--` are passed through untouched. Only tokens in flag
/// position are rewritten; a value token is never altered. When an option is
/// given more than once only its last occurrence is kept.
pub fn normalize_args<I, S>(raw_args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Each group is a lone token or a flag followed by its value
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut passthrough = false;
    let mut expects_value = false;

    for token in raw_args {
        let token = token.as_ref();

        if expects_value {
            if let Some(group) = groups.last_mut() {
                group.push(token.to_string());
            }
            expects_value = false;
            continue;
        }

        if passthrough || !token.starts_with("--") {
            let token = if !passthrough && token == "-h" {
                "--help"
            } else {
                token
            };
            groups.push(vec![token.to_string()]);
            continue;
        }

        if token == "--" {
            passthrough = true;
            groups.push(vec![token.to_string()]);
            continue;
        }

        match token.split_once('=') {
            Some((flag, value)) => groups.push(vec![flag.replace('.', "-"), value.to_string()]),
            None => {
                let flag = token.replace('.', "-");
                expects_value = takes_value(&flag);
                groups.push(vec![flag]);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut kept: Vec<Vec<String>> = groups
        .into_iter()
        .rev()
        .filter(|group| group.len() != 2 || seen.insert(group[0].clone()))
        .collect();
    kept.reverse();
    kept.into_iter().flatten().collect()
}

/// Whether a (normalized) flag consumes the following token
fn takes_value(flag: &str) -> bool {
    !matches!(flag, "--reset-secret" | "--help")
}

/// Parse operator arguments (without the program name) into a session
/// configuration
pub fn resolve<I, S>(raw_args: I) -> Result<SessionConfiguration, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = normalize_args(raw_args);
    let refs: Vec<&str> = normalized.iter().map(String::as_str).collect();

    match SessionArgs::from_args(&[COMMAND_NAME], &refs) {
        Ok(args) => Ok(args.into()),
        Err(early_exit) => match early_exit.status {
            Ok(()) => Err(ArgumentError::Help(early_exit.output)),
            Err(()) => Err(ArgumentError::Invalid(early_exit.output)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dotted_flags() {
        let result = normalize_args(["--poste", "robot", "--robot.port", "/dev/ttyX"]);
        assert_eq!(result, vec!["--poste", "robot", "--robot-port", "/dev/ttyX"]);
    }

    #[test]
    fn test_normalize_equals_form() {
        let result = normalize_args(["--teleop.id=leader=1", "--fps=60"]);
        assert_eq!(result, vec!["--teleop-id", "leader=1", "--fps", "60"]);
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let result = normalize_args(["--mode", "--weird.value", "--reset-secret", "--robot.id", "a.b"]);
        assert_eq!(
            result,
            vec!["--mode", "--weird.value", "--reset-secret", "--robot-id", "a.b"]
        );
    }

    #[test]
    fn test_normalize_short_help() {
        assert_eq!(normalize_args(["-h"]), vec!["--help"]);
        assert_eq!(normalize_args(["--mode", "-h"]), vec!["--mode", "-h"]);
    }

    #[test]
    fn test_normalize_repeated_option_keeps_last() {
        let result = normalize_args(["--fps", "30", "--poste", "robot", "--fps=60"]);
        assert_eq!(result, vec!["--poste", "robot", "--fps", "60"]);
    }

    #[test]
    fn test_normalize_after_terminator() {
        let result = normalize_args(["--", "--robot.port"]);
        assert_eq!(result, vec!["--", "--robot.port"]);
    }

    #[test]
    fn test_resolve_minimal() {
        let config = resolve(["--poste", "teleop"]).unwrap();
        assert_eq!(config, SessionConfiguration::new(Poste::Teleop));
    }

    #[test]
    fn test_resolve_dashed_spelling() {
        let config = resolve(["--poste", "teleop", "--teleop-port", "/dev/ttyL"]).unwrap();
        assert_eq!(config.teleop.port, "/dev/ttyL");
    }

    #[test]
    fn test_resolve_missing_poste() {
        let err = resolve(["--fps", "60"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("--poste"));
    }

    #[test]
    fn test_resolve_invalid_poste() {
        let err = resolve(["--poste", "pilot"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Invalid(_)));
        assert!(err.to_string().contains("invalid choice"));
    }

    #[test]
    fn test_resolve_non_integer_fps() {
        let err = resolve(["--poste", "robot", "--fps", "thirty"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("--fps"));
    }

    #[test]
    fn test_resolve_negative_fps() {
        let config = resolve(["--poste", "robot", "--fps", "-5"]).unwrap();
        assert_eq!(config.fps, -5);
    }

    #[test]
    fn test_resolve_repeated_option() {
        let config = resolve(["--poste", "teleop", "--fps", "30", "--fps", "60"]).unwrap();
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_resolve_short_help() {
        let err = resolve(["-h"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Help(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_resolve_help() {
        let err = resolve(["--help"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Help(_)));
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("--robot-cameras"));
    }
}

//! LeRobo-Vous daemon launcher
//!
//! Entry point for the robot-telepresence daemon. Before any session starts
//! the launcher:
//! - checks that `lerobot` is installed at a compatible version
//! - resolves the operator's command line into a [`SessionConfiguration`]
//! - hands that configuration to the external control-loop daemon
//!
//! # Example
//!
//! ```text
//! lrvd --poste robot --robot.port /dev/ttyACM0 --fps 60
//! lrvd --poste teleop --teleop.id leader_arm --log-level DEBUG
//! ```
//!
//! The minimum `lerobot` release is read from the build manifest:
//!
//! ```toml
//! [tool.lrvd.requirements]
//! lerobot = "0.2.0"
//! ```

pub mod cli;
pub mod config;
pub mod daemon;
pub mod gate;
pub mod session;

pub use cli::{resolve, ArgumentError, SessionArgs};
pub use config::{ConfigError, LauncherSettings};
pub use daemon::{run_daemon, DaemonCommand, DaemonError, SESSION_CONFIG_ENV};
pub use gate::{
    check_compatibility, compare, ComparisonOutcome, DependencyProbe, GateError, ManifestError,
    PackageVersion, PythonProbe, VersionParseError, VersionRequirement,
};
pub use session::{LogLevel, Poste, RobotConfig, SessionConfiguration, TeleopConfig};

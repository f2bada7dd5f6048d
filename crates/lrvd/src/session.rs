//! Resolved session configuration handed to the daemon

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MODE: &str = "solo";
pub const DEFAULT_TELEOP_TYPE: &str = "so101_leader";
pub const DEFAULT_TELEOP_PORT: &str = "/dev/ttyACM_LEADER";
pub const DEFAULT_ROBOT_TYPE: &str = "so101_follower";
pub const DEFAULT_ROBOT_PORT: &str = "/dev/ttyACM_FOLLOWER";
pub const DEFAULT_FPS: i64 = 30;

/// Operating role of this daemon instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Poste {
    /// Operator control station (reads the leader arm)
    Teleop,
    /// Controlled device (drives the follower arm)
    Robot,
}

impl Poste {
    pub fn as_str(&self) -> &'static str {
        match self {
            Poste::Teleop => "teleop",
            Poste::Robot => "robot",
        }
    }
}

impl fmt::Display for Poste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Poste {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teleop" => Ok(Poste::Teleop),
            "robot" => Ok(Poste::Robot),
            other => Err(format!(
                "invalid choice: '{}' (choose from 'teleop', 'robot')",
                other
            )),
        }
    }
}

/// Daemon log level, spelled the way the daemon expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Equivalent filter for the launcher's own logger
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(format!(
                "invalid choice: '{}' (choose from 'DEBUG', 'INFO', 'WARNING', 'ERROR')",
                other
            )),
        }
    }
}

/// Leader-side device settings (`teleop.*` flags)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleopConfig {
    #[serde(rename = "type")]
    pub device_type: String,
    pub port: String,
    pub id: Option<String>,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            device_type: DEFAULT_TELEOP_TYPE.to_string(),
            port: DEFAULT_TELEOP_PORT.to_string(),
            id: None,
        }
    }
}

/// Follower-side device settings (`robot.*` flags)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(rename = "type")]
    pub device_type: String,
    pub port: String,
    pub id: Option<String>,
    /// Camera configuration as raw JSON text, interpreted by the daemon
    pub cameras: Option<String>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            device_type: DEFAULT_ROBOT_TYPE.to_string(),
            port: DEFAULT_ROBOT_PORT.to_string(),
            id: None,
            cameras: None,
        }
    }
}

/// Fully populated session configuration.
///
/// Both device sections are always present regardless of `poste`; the daemon
/// decides which one applies to the selected role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    pub poste: Poste,
    pub mode: String,
    pub teleop: TeleopConfig,
    pub robot: RobotConfig,
    pub fps: i64,
    pub reset_secret: bool,
    pub log_level: LogLevel,
}

impl SessionConfiguration {
    /// Configuration for `poste` with every other field at its default
    pub fn new(poste: Poste) -> Self {
        Self {
            poste,
            mode: DEFAULT_MODE.to_string(),
            teleop: TeleopConfig::default(),
            robot: RobotConfig::default(),
            fps: DEFAULT_FPS,
            reset_secret: false,
            log_level: LogLevel::default(),
        }
    }

    /// Serialize for the daemon boundary
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poste_from_str() {
        assert_eq!("teleop".parse::<Poste>(), Ok(Poste::Teleop));
        assert_eq!("robot".parse::<Poste>(), Ok(Poste::Robot));
        assert!("Robot".parse::<Poste>().is_err());
        assert!("".parse::<Poste>().is_err());
    }

    #[test]
    fn test_log_level_choices_are_case_sensitive() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("warning".parse::<LogLevel>().is_err());
        assert!("WARN".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_filter_mapping() {
        assert_eq!(LogLevel::Warning.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfiguration::new(Poste::Robot);
        assert_eq!(config.mode, "solo");
        assert_eq!(config.teleop.device_type, "so101_leader");
        assert_eq!(config.teleop.port, "/dev/ttyACM_LEADER");
        assert_eq!(config.robot.device_type, "so101_follower");
        assert_eq!(config.robot.port, "/dev/ttyACM_FOLLOWER");
        assert_eq!(config.fps, 30);
        assert!(!config.reset_secret);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_shape() {
        let mut config = SessionConfiguration::new(Poste::Teleop);
        config.robot.cameras = Some(r#"{"front": {"type": "opencv"}}"#.to_string());

        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["poste"], "teleop");
        assert_eq!(value["teleop"]["type"], "so101_leader");
        assert_eq!(value["teleop"]["id"], serde_json::Value::Null);
        assert_eq!(value["robot"]["cameras"], r#"{"front": {"type": "opencv"}}"#);
        assert_eq!(value["log_level"], "INFO");
    }
}

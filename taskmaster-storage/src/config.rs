//! Application configuration file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::json_file;

/// Config file used when no custom path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Preferences file used when the config does not name one.
pub const DEFAULT_USER_PREFS_FILE: &str = "preferences.json";

/// Persisted application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub log_level: LogLevel,
    pub user_prefs_file_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            user_prefs_file_path: PathBuf::from(DEFAULT_USER_PREFS_FILE),
        }
    }
}

/// Log verbosity.
///
/// Parsing is case-insensitive and also accepts the older level names
/// (`SEVERE`, `WARNING`, `CONFIG`, `FINE`, `FINER`, `FINEST`, `ALL`). `OFF`
/// silences logging entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_directive().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFF" => Ok(LogLevel::Off),
            "SEVERE" | "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "CONFIG" | "FINE" | "DEBUG" => Ok(LogLevel::Debug),
            "FINER" | "FINEST" | "TRACE" | "ALL" => Ok(LogLevel::Trace),
            other => Err(format!(
                "unknown log level '{other}'; expected: off, error, warn, info, debug, trace"
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, <LogLevel as TryFrom<String>>::Error> {
        s.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

/// Read the config at `path`. Same NotFound/Corrupt contract as every other file.
pub fn read_config(path: &Path) -> Result<Config, StorageError> {
    json_file::read_json(path)
}

/// Atomically write `config` to `path`.
pub fn save_config(config: &Config, path: &Path) -> Result<(), StorageError> {
    json_file::write_json(path, config)
}

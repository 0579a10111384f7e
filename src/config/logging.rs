//! `[logging]` section
//!
//! Unknown levels and rotations are rejected when the file is loaded, the
//! same way `[demo] flow_kind` is.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use super::APP_NAME;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file for the life of the process
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log rotation '{0}' (expected hourly, daily or never)")]
pub struct InvalidRotation(pub String);

impl LogRotation {
    pub const ALL: [LogRotation; 3] = [Self::Hourly, Self::Daily, Self::Never];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for LogRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogRotation {
    type Err = InvalidRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rotation| rotation.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidRotation(s.to_string()))
    }
}

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level for this crate's targets: trace, debug, info, warn, error or off
    pub level: String,
    /// Also write JSON lines to `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem; the appender adds the date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: APP_NAME.to_string(),
        }
    }
}

/// `[logging]` as written in the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let level = match file.level {
            Some(level) => {
                level
                    .parse::<LevelFilter>()
                    .with_context(|| format!("Invalid [logging] level '{}'", level))?;
                level.to_lowercase()
            }
            None => defaults.level,
        };

        let file_rotation = match file.file_rotation {
            Some(rotation) => rotation
                .parse()
                .context("Invalid [logging] file_rotation")?,
            None => defaults.file_rotation,
        };

        Ok(Self {
            level,
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_rotation,
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        })
    }
}

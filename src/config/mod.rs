//! Configuration for the component server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/fragments/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod demo;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use demo::{DemoConfig, FileDemo};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name used for the config directory and log file prefix
pub const APP_NAME: &str = "fragments";

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_STATIC_DIR: &str = "static";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Root of the template store (component identifiers are relative to it)
    pub template_dir: PathBuf,

    /// Directory served under /static
    pub static_dir: PathBuf,

    /// Sample data shown on the index page
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            demo: DemoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure: every key optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,
    pub template_dir: Option<String>,
    pub static_dir: Option<String>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/fragments/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_NAME).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        if let Err(e) = std::fs::write(&path, Self::default().to_toml()) {
            tracing::debug!("Could not write default config to {}: {}", path.display(), e);
        }
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: a broken config should stop startup rather than
    /// silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse config file {} (check quoting, true/false values and section names)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Bind address: env > file > default
        let bind_addr = env("FRAGMENTS_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind_addr))?;

        // Template store: env > file > default
        let template_dir = env("FRAGMENTS_TEMPLATE_DIR")
            .or(file.template_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));

        // Static files: env > file > default
        let static_dir = env("FRAGMENTS_STATIC_DIR")
            .or(file.static_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        // Demo data: env overrides individual keys of the [demo] section
        let mut demo_file = file.demo.unwrap_or_default();
        if let Some(rows) = env("FRAGMENTS_TABLE_ROWS") {
            let rows = rows
                .parse()
                .with_context(|| format!("FRAGMENTS_TABLE_ROWS must be a number, got '{}'", rows))?;
            demo_file.table_rows = Some(rows);
        }
        if let Some(kind) = env("FRAGMENTS_FLOW_KIND") {
            demo_file.flow_kind = Some(kind);
        }
        let demo = DemoConfig::from_file(Some(demo_file))?;

        let logging = LoggingConfig::from_file(file.logging)?;

        Ok(Self {
            bind_addr,
            template_dir,
            static_dir,
            demo,
            logging,
        })
    }
}

//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/aura/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/aura/` (~/.config/aura/)
//! - Data: `$XDG_DATA_HOME/aura/` (~/.local/share/aura/)
//! - State/Logs: `$XDG_STATE_HOME/aura/` (~/.local/state/aura/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Remote aura report configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Entry storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Days ahead produced by each forecast model
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Days ahead produced by the weekly outlook
    #[serde(default = "default_outlook_days")]
    pub outlook_days: u32,

    /// Number of most frequent tags in the correlation matrix
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,

    /// Maximum confidence scores reported
    #[serde(default = "default_max_confidence_scores")]
    pub max_confidence_scores: usize,

    /// Maximum pattern strength insights reported
    #[serde(default = "default_max_pattern_insights")]
    pub max_pattern_insights: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
            outlook_days: default_outlook_days(),
            top_tags: default_top_tags(),
            max_confidence_scores: default_max_confidence_scores(),
            max_pattern_insights: default_max_pattern_insights(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.forecast_days == 0 || self.forecast_days > 90 {
            return Err(Error::Config(
                "analytics.forecast_days must be between 1 and 90".to_string(),
            ));
        }
        if self.outlook_days == 0 || self.outlook_days > 31 {
            return Err(Error::Config(
                "analytics.outlook_days must be between 1 and 31".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_forecast_days() -> u32 {
    14
}

fn default_outlook_days() -> u32 {
    7
}

fn default_top_tags() -> usize {
    5
}

fn default_max_confidence_scores() -> usize {
    6
}

fn default_max_pattern_insights() -> usize {
    4
}

/// Remote aura report configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Analysis service base URL
    #[serde(default = "default_report_server_url")]
    pub server_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,

    /// Entries required before a report is requested
    #[serde(default = "default_report_min_entries")]
    pub min_entries: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            server_url: default_report_server_url(),
            timeout_secs: default_report_timeout(),
            min_entries: default_report_min_entries(),
        }
    }
}

impl ReportConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(Error::Config(
                "report.server_url must not be empty".to_string(),
            ));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "report.server_url must be an http(s) URL, got {}",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "report.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_report_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_report_timeout() -> u64 {
    30
}

fn default_report_min_entries() -> usize {
    3
}

/// Entry storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Key under which the entry collection is stored
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    "aura-entries".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analytics.validate()?;
        config.report.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/aura/config.toml` (~/.config/aura/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("aura").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/aura/` (~/.local/share/aura/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("aura")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/aura/` (~/.local/state/aura/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("aura")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/aura/data.db` (~/.local/share/aura/data.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/aura/aura.log` (~/.local/state/aura/aura.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("aura.log")
    }
}

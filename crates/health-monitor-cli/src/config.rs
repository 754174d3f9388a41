//! Application configuration
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. A TOML file passed with `--config`
//! 3. `HEALTH_MONITOR_*` environment variables
//! 4. Command-line flags (applied by the caller)
//!
//! ```toml
//! data_dir = "/var/lib/health-monitor"
//! log_level = "info"
//! log_format = "json"
//! date_format = "%m-%d-%Y"
//! ```

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub const ENV_DATA_DIR: &str = "HEALTH_MONITOR_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "HEALTH_MONITOR_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "HEALTH_MONITOR_LOG_FORMAT";

/// Log line format on stderr
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::config(format!("unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory of the sled database
    pub data_dir: PathBuf,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// chrono format string for dates typed into the console
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./health-monitor-data"),
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            date_format: "%m-%d-%Y".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&text)?)
    }

    /// Apply `HEALTH_MONITOR_*` overrides looked up through `var`
    pub fn with_env<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = var(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(format) = var(ENV_LOG_FORMAT) {
            self.log_format = format.parse()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let sample = NaiveDate::from_ymd_opt(2024, 12, 31)
            .ok_or_else(|| CliError::Internal("invalid sample date".into()))?;

        let mut rendered = String::new();
        let round_trips = write!(rendered, "{}", sample.format(&self.date_format)).is_ok()
            && NaiveDate::parse_from_str(&rendered, &self.date_format).ok() == Some(sample);
        if !round_trips {
            return Err(CliError::config(format!(
                "date_format {:?} must contain a full year, month and day",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Parse a date typed by the user
    pub fn parse_date(&self, input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), &self.date_format).ok()
    }

    /// Human-readable form of `date_format`, e.g. `MM-DD-YYYY`
    pub fn date_label(&self) -> String {
        self.date_format
            .replace("%m", "MM")
            .replace("%d", "DD")
            .replace("%Y", "YYYY")
    }
}

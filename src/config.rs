use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::catalog::contributors::DEFAULT_TOP_COUNT;

pub const DEFAULT_CONFIG_PATH: &str = ".hacktoberfest.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
// Organisers run the event on UTC+7.
const DEFAULT_EVENT_START: &str = "2023-10-01T00:00:00+07:00";
const DEFAULT_EVENT_END: &str = "2023-10-31T00:00:00+07:00";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .hacktoberfest.toml.
/// All sections are optional; the board works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    /// Event window used by the countdown
    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub contributors: ContributorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend serving /repo and /contrib.
    /// If None, falls back to API_BASE_URL env var.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_event_start")]
    pub start: DateTime<FixedOffset>,

    /// Last day of the event (inclusive)
    #[serde(default = "default_event_end")]
    pub end: DateTime<FixedOffset>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            start: default_event_start(),
            end: default_event_end(),
        }
    }
}

fn default_event_start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(DEFAULT_EVENT_START)
        .expect("default event start is valid RFC 3339")
}

fn default_event_end() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(DEFAULT_EVENT_END).expect("default event end is valid RFC 3339")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributorsConfig {
    /// How many leading contributors are tagged as top contributors
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Substring identifying automated accounts, which are hidden from the board
    #[serde(default = "default_bot_marker")]
    pub bot_marker: String,
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            top_count: default_top_count(),
            bot_marker: default_bot_marker(),
        }
    }
}

fn default_top_count() -> usize {
    DEFAULT_TOP_COUNT
}

fn default_bot_marker() -> String {
    "[bot]".to_string()
}

impl Config {
    /// Load configuration from the given path, or return the default config
    /// if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the API base URL: the CLI override wins, then the config file
    /// value, then the API_BASE_URL env var, then the local default.
    pub fn api_base_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| self.api.base_url.clone())
            .or_else(|| std::env::var("API_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }
}

//! Configuration file parser for ~/.config/skillbook/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::hover::DEFAULT_HOVER_DELAY;
use crate::render::DEFAULT_ICON;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level application configuration.
///
/// Any subset of keys can be given; the rest keep their defaults. Command-line
/// flags override the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location: a file path or an http(s) URL.
    pub dataset: String,

    /// Delay before a card loses its highlight after the pointer leaves it.
    pub hover_delay_ms: u64,

    /// Width of the detail popout, in columns.
    pub popout_width: u16,

    /// Icon shown for skills without their own.
    pub default_icon: String,

    /// Navigation token to open at startup (a job key or `search?q=...`).
    pub open: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: "data/jobs.json".to_string(),
            hover_delay_ms: DEFAULT_HOVER_DELAY.as_millis() as u64,
            popout_width: 36,
            default_icon: DEFAULT_ICON.to_string(),
            open: String::new(),
        }
    }
}

const KNOWN_KEYS: [&str; 5] = [
    "dataset",
    "hover_delay_ms",
    "popout_width",
    "default_icon",
    "open",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(dataset = %config.dataset, "Loaded configuration");
        Ok(config)
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }
}

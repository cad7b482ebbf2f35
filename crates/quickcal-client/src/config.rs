//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/quickcal/config.toml` by default. Every section is optional.

use std::path::{Path, PathBuf};

use quickcal_core::{ClockZone, TracingOutputFormat};
use serde::{Deserialize, Serialize};

/// Configuration for the quickcal client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// How timestamps on the page are interpreted.
    pub environment: EnvironmentSettings,

    /// What to do with the built link.
    pub output: OutputSettings,

    /// Log rendering on stderr.
    pub log: LogSettings,
}

/// Parsing environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    /// Zone for timestamps without an explicit offset.
    pub zone: ClockZone,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            zone: ClockZone::Local,
        }
    }
}

/// Default actions for `quickcal link`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Open the link in the browser.
    pub open: bool,

    /// Copy the link to the clipboard.
    pub copy: bool,

    /// Print JSON instead of the bare link.
    pub json: bool,
}

/// Log settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `compact`, `pretty` or `json`.
    pub format: TracingOutputFormat,

    /// Filter directive such as `quickcal_core=trace`; overrides `RUST_LOG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quickcal")
    }
}

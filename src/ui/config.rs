//! # Configuration
//!
//! Reads user configuration from `~/.config/timepilot/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct holds the model settings and the theme the app
//! starts with. Every field has a default, so a missing file is the same as
//! an empty one. Theme changes made while the app runs are not written back.
//!
//! ```json
//! {
//!   "model": "gemini-2.5-flash",
//!   "base_url": "https://generativelanguage.googleapis.com",
//!   "temperature": 0.7,
//!   "api_key_env": "GEMINI_API_KEY",
//!   "theme_mode": "dark",
//!   "accent": "violet"
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::planner::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::planner::prompt::DEFAULT_TEMPERATURE;
use crate::ui::theme::{AccentColor, ThemeMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub theme_mode: ThemeMode,

    #[serde(default)]
    pub accent: AccentColor,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            theme_mode: ThemeMode::default(),
            accent: AccentColor::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. Returns
    /// `Config::default()` if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Read the API key from the environment: the configured variable first,
    /// then [`FALLBACK_API_KEY_ENV`]. Blank values count as absent.
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "timepilot")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

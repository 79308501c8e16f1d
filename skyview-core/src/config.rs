use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_BASE_URL;

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "SKYVIEW_API_KEY";

/// City shown when the interactive screen opens.
pub const DEFAULT_CITY: &str = "Mumbai";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Mumbai"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather `appid` token.
    pub api_key: Option<String>,

    pub default_city: String,

    /// API root; `/weather` is appended.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML contents; missing keys take their defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyview", "skyview-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the API key. Blank input clears it.
    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// API key from [`API_KEY_ENV`] if set, otherwise from the file.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_override(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}

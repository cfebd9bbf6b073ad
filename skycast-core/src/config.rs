use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinate;

/// Base endpoint for weatherapi.com.
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Days requested from the forecast endpoint unless overridden.
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Coordinate used when no location can be resolved (Moscow).
pub const DEFAULT_FALLBACK_LOCATION: Coordinate =
    Coordinate { latitude: 55.7558, longitude: 37.6173 };

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// weatherapi.com API key; set with `skycast configure`.
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Used whenever location services or permission are unavailable.
    #[serde(default = "default_fallback_location")]
    pub fallback_location: Coordinate,

    /// Pins the resolver to a fixed coordinate instead of asking the
    /// platform for one.
    pub location: Option<Coordinate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            fallback_location: DEFAULT_FALLBACK_LOCATION,
            location: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

fn default_fallback_location() -> Coordinate {
    DEFAULT_FALLBACK_LOCATION
}

impl Config {
    /// Returns the configured API key.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your weatherapi.com key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "jammming";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub search: SearchConfig,
    pub timing: TimingConfig,
}

/// Spotify application registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    /// Client ID of the registered Spotify application
    pub client_id: String,
    /// Redirect URI registered for the application
    pub redirect_uri: String,
    /// Space separated OAuth scopes
    pub scopes: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: "492e1e45ea814fa3ac555fe1576aaf5b".to_string(),
            redirect_uri: "http://127.0.0.1:8898/callback".to_string(),
            scopes: "playlist-read-private playlist-modify-public playlist-modify-private".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Tracks returned per query
    pub limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// Banner and refresh delays, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub banner_duration_ms: u64,
    /// Picker refresh after a save, when the picker is open
    pub save_refresh_delay_ms: u64,
    /// Picker refresh after a delete
    pub delete_refresh_delay_ms: u64,
    /// Delay between the picker fetch finishing and the "retrieved" banner
    pub picker_done_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            banner_duration_ms: 3000,
            save_refresh_delay_ms: 1500,
            delete_refresh_delay_ms: 800,
            picker_done_delay_ms: 400,
        }
    }
}

impl TimingConfig {
    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_ms)
    }

    pub fn save_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.save_refresh_delay_ms)
    }

    pub fn delete_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.delete_refresh_delay_ms)
    }

    pub fn picker_done_delay(&self) -> Duration {
        Duration::from_millis(self.picker_done_delay_ms)
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(CONFIG_DIR_NAME);

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .context("Failed to read config file")?;

            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;

            tracing::debug!(path = %path.display(), "Loaded config");
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!(path = %path.display(), "Wrote default config");
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// Dashboard configuration stored on disk.
///
/// Example TOML:
/// proxy_url = "http://localhost:3000"
/// default_city = "London"
/// audio_player = "mpv --no-video --loop=inf"
/// sounds_dir = "/usr/share/weather/sounds"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the forecast proxy.
    pub proxy_url: String,

    /// City shown when neither a city nor coordinates are given.
    pub default_city: Option<String>,

    /// Command used to play a clip; the clip path is appended as the last argument.
    pub audio_player: Option<String>,

    /// Directory holding the ambient sound files.
    pub sounds_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            default_city: None,
            audio_player: None,
            sounds_dir: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Where sound files are looked up: the configured directory, else `./sounds`.
    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("sounds"))
    }

    /// The player command split into program and leading arguments.
    pub fn audio_player_command(&self) -> Option<(String, Vec<String>)> {
        let mut parts = self.audio_player.as_deref()?.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

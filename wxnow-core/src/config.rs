use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::WeatherError;

pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json";

/// Settings file stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// # weather_url = "https://api.openweathermap.org/data/2.5/weather"
/// # geolocation_url = "https://ipapi.co/json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation_url: Option<String>,
}

/// Fully resolved settings handed to the resolver and the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub weather_url: String,
    pub geolocation_url: String,
}

impl Config {
    /// Load config from the platform config directory, or an empty default if
    /// there is no file yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Ok(Self::load_from(&path)?)
    }

    /// Read a config file. A missing file is not an error; an unreadable or
    /// malformed one is [`WeatherError::Config`].
    pub fn load_from(path: &Path) -> Result<Self, WeatherError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|err| {
            WeatherError::Config(format!(
                "Failed to read config file: {}: {err}",
                path.display()
            ))
        })?;

        toml::from_str(&contents).map_err(|err| {
            WeatherError::Config(format!(
                "Failed to parse config file: {}: {err}",
                path.display()
            ))
        })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wxnow", "wxnow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the settings, preferring the API key from the environment over
    /// the one stored in the file. Blank keys count as absent.
    pub fn settings(&self, env_api_key: Option<String>) -> Result<Settings, WeatherError> {
        let api_key = non_blank(env_api_key)
            .or_else(|| non_blank(self.api_key.clone()))
            .ok_or(WeatherError::MissingApiKey)?;

        Ok(Settings {
            api_key,
            weather_url: self
                .weather_url
                .clone()
                .unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            geolocation_url: self
                .geolocation_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GEOLOCATION_URL.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_error_when_no_key_anywhere() {
        let cfg = Config::default();
        let err = cfg.settings(None).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn blank_env_key_is_treated_as_missing() {
        let cfg = Config::default();
        let err = cfg.settings(Some("   ".into())).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };
        let settings = cfg.settings(Some("ENV_KEY".into())).expect("settings");
        assert_eq!(settings.api_key, "ENV_KEY");
    }

    #[test]
    fn file_key_used_when_env_absent() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };
        let settings = cfg.settings(None).expect("settings");

        assert_eq!(settings.api_key, "FILE_KEY");
        assert_eq!(settings.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(settings.geolocation_url, DEFAULT_GEOLOCATION_URL);
    }

    #[test]
    fn url_overrides_are_respected() {
        let cfg = Config {
            api_key: None,
            weather_url: Some("http://localhost:9000/weather".into()),
            geolocation_url: Some("http://localhost:9000/json".into()),
        };
        let settings = cfg.settings(Some("KEY".into())).expect("settings");

        assert_eq!(settings.weather_url, "http://localhost:9000/weather");
        assert_eq!(settings.geolocation_url, "http://localhost:9000/json");
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_api_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("SAVED".into()),
            ..Config::default()
        };
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("SAVED"));
        assert_eq!(loaded.weather_url, None);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        // A directory exists but cannot be read as a file.
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

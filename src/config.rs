//! Application configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file in the
//! user's config directory, then environment variables.
//! - Linux: ~/.config/movie-browser/config.toml
//! - macOS: ~/Library/Application Support/movie-browser/config.toml
//! - Windows: %APPDATA%\movie-browser\config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_ACCESS_TOKEN: &str = "TMDB_API_ACCESS_KEY";
pub const ENV_API_BASE_URL: &str = "TMDB_API_BASE_URL";
pub const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// TMDB API root, without the `/3` version segment
    pub api_base_url: String,
    /// Image CDN root, sizes are appended to it
    pub image_base_url: String,
    /// API read access token, sent as a bearer credential
    pub access_token: Option<String>,
    pub language: String,
    pub crossfade_duration_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            access_token: None,
            language: "en-US".to_string(),
            crossfade_duration_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load the effective configuration. Never fails: a broken config file is
    /// logged and skipped.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|err| {
                tracing::warn!("⚠️  {}, using defaults", err);
                Self::default()
            }),
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());

        if config.access_token.is_none() {
            tracing::warn!(
                "⚠️  No TMDB access token configured, set {} or access_token in the config file",
                ENV_ACCESS_TOKEN
            );
        }

        config
    }

    /// Where the config file is expected
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("movie-browser");
        path.push("config.toml");
        Some(path)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("📁 Config loaded from: {}", path.display());
        Ok(config)
    }

    /// Override values from the environment
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = non_empty(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(url) = non_empty(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(language) = non_empty(ENV_LANGUAGE) {
            self.language = language;
        }
    }

    pub fn crossfade_duration(&self) -> Duration {
        Duration::from_millis(self.crossfade_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

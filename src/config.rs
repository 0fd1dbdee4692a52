//! Configuration loading.
//!
//! Settings come from `<config_dir>/movie_finder/config.toml` when present,
//! with `OMDB_API_KEY` taking precedence over the file's key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app::movie::MovieLinks;
use crate::error::Result;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OMDb API access.
    pub omdb: OmdbConfig,
    /// IMDb link and placeholder poster settings.
    pub links: MovieLinks,
    /// Directory for rotating log files.
    pub log_dir: PathBuf,
}

/// OMDb configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            omdb: OmdbConfig::default(),
            links: MovieLinks::default(),
            log_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("movie_finder")
                .join("logs"),
        }
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: "8efff68".to_string(),
            base_url: "https://www.omdbapi.com/".to_string(),
        }
    }
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_finder")
        .join("config.toml")
}

/// Load configuration from a file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from the standard location and apply environment overrides.
pub fn load_config() -> Result<Config> {
    let mut config = load_config_from(&config_path())?;
    apply_api_key_override(&mut config, std::env::var("OMDB_API_KEY").ok());
    Ok(config)
}

fn apply_api_key_override(config: &mut Config, api_key: Option<String>) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.omdb.api_key = key.trim().to_string();
    }
}

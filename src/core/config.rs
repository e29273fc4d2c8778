//! Startup configuration: the API credential from the environment, and a
//! small TOML preferences file for settings that survive across runs.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::constants::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OPENAI_API_KEY is not set. Export it or add it to a .env file in the working directory."
    )]
    MissingApiKey,
}

/// The credential and endpoint read from the environment at process start.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

impl Credentials {
    /// Read credentials from the environment. Fails fast when the key is
    /// absent or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }
}

/// Persisted user preferences. Session history is deliberately not part of
/// this; only the starting model and theme carry across runs.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Prefs {
    pub default_model: Option<String>,
    /// "dark" or "light"
    pub theme: Option<String>,
}

impl Prefs {
    pub fn load() -> Result<Prefs, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::prefs_path())
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Prefs, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let prefs: Prefs = toml::from_str(&contents)?;
            Ok(prefs)
        } else {
            Ok(Prefs::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(&Self::prefs_path())
    }

    pub fn save_to_path(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn dark_mode(&self) -> bool {
        self.theme.as_deref() == Some("dark")
    }

    fn prefs_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "orca")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }
}

//! Configuration file management for Docsage.
//!
//! Reads `~/.config/docsage/config.toml` for settings and
//! `~/.config/docsage/secret.json` for the Gemini API key. The
//! `GEMINI_API_KEY` environment variable takes precedence over the secret file.

use docsage_core::config::{AppConfig, GeminiConfig, SecretConfig};
use docsage_core::{DocsageError, Result};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const CONFIG_FILE_NAME: &str = "config.toml";
const SECRET_FILE_NAME: &str = "secret.json";

/// Locations of the configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub secret_file: PathBuf,
}

impl ConfigPaths {
    /// Returns `~/.config/docsage/{config.toml,secret.json}`.
    pub fn default_paths() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocsageError::config("Could not determine home directory"))?;
        Ok(Self::with_dir(home.join(".config").join("docsage")))
    }

    /// Uses `dir` for both files.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            config_file: dir.join(CONFIG_FILE_NAME),
            secret_file: dir.join(SECRET_FILE_NAME),
        }
    }

    /// Overrides the settings file, keeping the secret file next to it.
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        let config_file = path.into();
        let secret_file = config_file
            .parent()
            .map(|dir| dir.join(SECRET_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(SECRET_FILE_NAME));
        Self {
            config_file,
            secret_file,
        }
    }
}

/// Loads `config.toml`. A missing file yields the defaults.
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        DocsageError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Loads `secret.json`. A missing file yields an empty secret config.
pub fn load_secret_config(path: &Path) -> Result<SecretConfig> {
    if !path.exists() {
        return Ok(SecretConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        DocsageError::config(format!(
            "Failed to parse secret file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Picks the Gemini credentials: `env_key` wins over the secret file.
pub fn resolve_gemini_config(
    secret: SecretConfig,
    env_key: Option<String>,
) -> Option<GeminiConfig> {
    match env_key.filter(|key| !key.trim().is_empty()) {
        Some(api_key) => Some(GeminiConfig {
            api_key,
            model_name: secret.gemini.and_then(|g| g.model_name),
        }),
        None => secret.gemini.filter(|g| !g.api_key.trim().is_empty()),
    }
}

/// Everything needed to build a session and its agent.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub app: AppConfig,
    pub gemini: Option<GeminiConfig>,
}

/// Loads both files and applies the environment override.
pub fn load(paths: &ConfigPaths) -> Result<LoadedConfig> {
    let app = load_app_config(&paths.config_file)?;
    let secret = load_secret_config(&paths.secret_file)?;
    let gemini = resolve_gemini_config(secret, std::env::var(API_KEY_ENV).ok());
    Ok(LoadedConfig { app, gemini })
}

//! Configuration model for Docsage.
//!
//! Only the shapes live here; loading from `~/.config/docsage/` is done by
//! `docsage-interaction::config`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default lifetime of a citation highlight, in milliseconds.
pub const DEFAULT_HIGHLIGHT_WINDOW_MS: u64 = 1000;

/// Root configuration structure for `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub gemini: GeminiSettings,
}

/// Behaviour of a single analysis session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a citation highlight stays visible.
    #[serde(default = "default_highlight_window_ms")]
    pub highlight_window_ms: u64,
    /// Whether opening a document immediately produces a summary.
    #[serde(default = "default_summarize_on_open")]
    pub summarize_on_open: bool,
}

impl SessionConfig {
    pub fn highlight_window(&self) -> Duration {
        Duration::from_millis(self.highlight_window_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            highlight_window_ms: DEFAULT_HIGHLIGHT_WINDOW_MS,
            summarize_on_open: true,
        }
    }
}

fn default_highlight_window_ms() -> u64 {
    DEFAULT_HIGHLIGHT_WINDOW_MS
}

fn default_summarize_on_open() -> bool {
    true
}

/// Non-secret Gemini settings from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GeminiSettings {
    #[serde(default)]
    pub model_name: Option<String>,
    /// Overrides the REST endpoint, e.g. for a proxy.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Root configuration structure for `secret.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

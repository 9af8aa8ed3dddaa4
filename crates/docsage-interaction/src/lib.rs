//! External collaborators for Docsage sessions.
//!
//! - [`GeminiApiAgent`]: the four analysis actions over the Gemini REST API
//! - [`data_uri`]: encoding and parsing of document payloads
//! - [`config`]: loading `config.toml` and `secret.json`
//! - [`prompts`]: prompt templates for each action

pub mod config;
pub mod data_uri;
pub mod gemini_api_agent;
pub mod prompts;

pub use gemini_api_agent::GeminiApiAgent;

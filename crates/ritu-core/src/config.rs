//! Application configuration types.
//!
//! Loaded from `config.toml` under the platform config directory; every field
//! has a compiled-in default so the file is optional. Secrets live in a
//! separate `secret.json` (see `SecretConfig`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::conversation::DEFAULT_HISTORY_LIMIT;
use crate::error::Result;

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_chat_max_tokens() -> u32 {
    600
}

fn default_routine_max_tokens() -> u32 {
    2000
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("products.json")
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name sent in the request body.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Response-size allowance for free-form chat.
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,
    /// Larger allowance for routine generation.
    #[serde(default = "default_routine_max_tokens")]
    pub routine_max_tokens: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Quiescence window for the search input, in milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Path of the catalog resource (`{ "products": [...] }`).
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            chat_max_tokens: default_chat_max_tokens(),
            routine_max_tokens: default_routine_max_tokens(),
            history_limit: default_history_limit(),
            search_debounce_ms: default_search_debounce_ms(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document; missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Secret configuration (`secret.json`).
///
/// The API key is optional: the original deployment posts through a proxy
/// that injects credentials server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

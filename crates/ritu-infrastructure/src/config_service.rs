//! Application configuration loading.

use std::fs;
use std::path::Path;

use ritu_core::config::AppConfig;

use crate::paths::RituPaths;

/// Loads the application configuration from the default location
/// (`~/.config/ritu/config.toml`).
///
/// A missing file yields the compiled-in defaults; an unreadable or invalid
/// file is logged and also degrades to the defaults.
pub fn load_app_config() -> AppConfig {
    match RituPaths::config_file() {
        Ok(path) => load_app_config_from(&path),
        Err(e) => {
            tracing::warn!(error = %e, "cannot resolve config path, using defaults");
            AppConfig::default()
        }
    }
}

/// Loads the application configuration from an explicit path.
pub fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
            return AppConfig::default();
        }
    };

    match AppConfig::from_toml_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            AppConfig::default()
        }
    }
}

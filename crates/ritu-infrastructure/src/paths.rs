//! Unified path management for ritu configuration and data files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for ritu.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/ritu/              # Config directory
/// ├── config.toml              # Application configuration
/// └── secret.json              # API key
///
/// ~/.local/share/ritu/         # Data directory
/// └── slots/                   # Persisted state slots (selection, locale, live_search)
/// ```
pub struct RituPaths;

impl RituPaths {
    /// Returns the ritu configuration directory (e.g. `~/.config/ritu/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("ritu"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the ritu data directory (e.g. `~/.local/share/ritu/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("ritu"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the directory holding the persisted state slots.
    pub fn slots_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("slots"))
    }
}

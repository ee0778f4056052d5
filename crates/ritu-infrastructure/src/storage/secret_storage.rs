//! Secret configuration file storage.
//!
//! Provides secure loading of secret configuration from ~/.config/ritu/secret.json.

use std::fs;
use std::path::PathBuf;

use ritu_core::config::SecretConfig;

use crate::paths::RituPaths;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Configuration file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Storage for the secret configuration file (secret.json).
///
/// Read-only: API keys are provisioned by the user, never written by the
/// application.
///
/// # Security Note
///
/// This storage reads plaintext JSON files. The secret.json file should have
/// appropriate file permissions (e.g., 600) to prevent unauthorized access.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path (~/.config/ritu/secret.json).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = RituPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        assert!(matches!(
            storage.load(),
            Err(SecretStorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_parses_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"api_key":"sk-test"}"#).unwrap();

        let storage = SecretStorage::with_path(path);
        let config = storage.load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }
}

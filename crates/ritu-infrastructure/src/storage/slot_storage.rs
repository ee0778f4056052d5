//! Named JSON slot storage with atomic writes.
//!
//! The durable key-value surface backing the repositories: one JSON document
//! per named slot file under a common directory. Writes are all-or-nothing
//! (tmp file + fsync + atomic rename) and guarded by an exclusive file lock;
//! a missing or empty slot reads as `None`.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors that can occur during slot storage operations.
#[derive(Debug)]
pub enum SlotStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parse/serialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for SlotStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SlotStorageError::JsonError(e) => write!(f, "JSON error: {}", e),
            SlotStorageError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for SlotStorageError {}

impl From<std::io::Error> for SlotStorageError {
    fn from(e: std::io::Error) -> Self {
        SlotStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SlotStorageError {
    fn from(e: serde_json::Error) -> Self {
        SlotStorageError::JsonError(e)
    }
}

/// A directory of named JSON slots.
///
/// Responsibilities:
/// - **File locking** (exclusive write lock per slot)
/// - **Atomic read/write** (tmp file + atomic rename)
/// - **JSON (de)serialization** of slot values
///
/// Does NOT:
/// - Know about specific entities (selection, preferences)
/// - Decide corruption policy (delegated to the repository layer)
pub struct SlotStorage {
    dir: PathBuf,
}

impl SlotStorage {
    /// Creates a storage handle rooted at `dir`. The directory is created
    /// lazily on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Loads and deserializes a slot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: slot present and parsed
    /// - `Ok(None)`: slot file absent or empty
    /// - `Err`: failed to read or parse
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Result<Option<T>, SlotStorageError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Serializes and saves a slot atomically, overwriting any previous value.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) -> Result<(), SlotStorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.slot_path(slot);
        let _lock = FileLock::acquire(&path)?;

        let json = serde_json::to_string_pretty(value)?;

        // Write to a temporary file in the same directory.
        let tmp_path = self.temp_path(&path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Ensure data is written to disk before the rename.
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    /// Removes a slot. Missing slots are not an error.
    pub fn remove(&self, slot: &str) -> Result<(), SlotStorageError> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self, path: &Path) -> Result<PathBuf, SlotStorageError> {
        let parent = path.parent().ok_or_else(|| {
            SlotStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = path.file_name().ok_or_else(|| {
            SlotStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock for the given slot path.
    fn acquire(path: &Path) -> Result<Self, SlotStorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| SlotStorageError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        #[cfg(not(unix))]
        {
            // On non-Unix systems, we don't have file locking
            // This is acceptable for single-user desktop apps
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        // Try to remove lock file (best effort)
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());

        let value = serde_json::json!({ "name": "test", "count": 42 });
        storage.save("sample", &value).unwrap();

        let loaded: serde_json::Value = storage.load("sample").unwrap().unwrap();
        assert_eq!(loaded["name"], "test");
        assert_eq!(loaded["count"], 42);
    }

    #[test]
    fn test_load_missing_slot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());

        let loaded: Option<serde_json::Value> = storage.load("nope").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());

        storage.save("slot", &serde_json::json!([1, 2])).unwrap();
        storage.save("slot", &serde_json::json!([3])).unwrap();

        let loaded: Vec<u32> = storage.load("slot").unwrap().unwrap();
        assert_eq!(loaded, vec![3]);
    }

    #[test]
    fn test_corrupt_slot_is_a_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());
        fs::write(temp_dir.path().join("bad.json"), "{not json").unwrap();

        let result: Result<Option<serde_json::Value>, _> = storage.load("bad");
        assert!(matches!(result, Err(SlotStorageError::JsonError(_))));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());

        storage.save("slot", &serde_json::json!(true)).unwrap();

        assert!(!temp_dir.path().join(".slot.json.tmp").exists());
        assert!(temp_dir.path().join("slot.json").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::new(temp_dir.path().to_path_buf());

        storage.save("slot", &serde_json::json!(1)).unwrap();
        storage.remove("slot").unwrap();
        storage.remove("slot").unwrap();
        let loaded: Option<serde_json::Value> = storage.load("slot").unwrap();
        assert!(loaded.is_none());
    }
}

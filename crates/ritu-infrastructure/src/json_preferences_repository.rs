//! Preference persistence over JSON slots.
//!
//! Two independent slots: the active locale code and the live-search feature
//! flag. Both are best-effort and non-transactional; a failure on one never
//! affects the other.

use async_trait::async_trait;

use ritu_core::error::{Result, RituError};
use ritu_core::locale::Locale;
use ritu_core::repository::PreferencesRepository;

use crate::storage::SlotStorage;

const LOCALE_SLOT: &str = "locale";
const LIVE_SEARCH_SLOT: &str = "live_search";

/// `PreferencesRepository` backed by [`SlotStorage`].
pub struct JsonPreferencesRepository {
    storage: SlotStorage,
}

impl JsonPreferencesRepository {
    pub fn new(storage: SlotStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PreferencesRepository for JsonPreferencesRepository {
    async fn locale(&self) -> Option<Locale> {
        match self.storage.load::<String>(LOCALE_SLOT) {
            Ok(Some(code)) => {
                let locale = Locale::from_code(&code);
                if locale.is_none() {
                    tracing::warn!(slot = LOCALE_SLOT, %code, "ignoring unknown locale code");
                }
                locale
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(slot = LOCALE_SLOT, error = %e, "ignoring unreadable locale slot");
                None
            }
        }
    }

    async fn set_locale(&self, locale: Locale) -> Result<()> {
        self.storage
            .save(LOCALE_SLOT, &locale.code())
            .map_err(|e| RituError::persistence_write(LOCALE_SLOT, e.to_string()))
    }

    async fn live_search(&self) -> bool {
        match self.storage.load::<bool>(LIVE_SEARCH_SLOT) {
            Ok(Some(enabled)) => enabled,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(slot = LIVE_SEARCH_SLOT, error = %e, "ignoring unreadable flag slot");
                false
            }
        }
    }

    async fn set_live_search(&self, enabled: bool) -> Result<()> {
        self.storage
            .save(LIVE_SEARCH_SLOT, &enabled)
            .map_err(|e| RituError::persistence_write(LIVE_SEARCH_SLOT, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_locale_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonPreferencesRepository::new(SlotStorage::new(temp_dir.path().to_path_buf()));

        assert_eq!(repo.locale().await, None);
        repo.set_locale(Locale::Fr).await.unwrap();
        assert_eq!(repo.locale().await, Some(Locale::Fr));
    }

    #[tokio::test]
    async fn test_unknown_locale_code_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("locale.json"), "\"klingon\"").unwrap();
        let repo = JsonPreferencesRepository::new(SlotStorage::new(temp_dir.path().to_path_buf()));

        assert_eq!(repo.locale().await, None);
    }

    #[tokio::test]
    async fn test_live_search_defaults_false() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonPreferencesRepository::new(SlotStorage::new(temp_dir.path().to_path_buf()));

        assert!(!repo.live_search().await);
        repo.set_live_search(true).await.unwrap();
        assert!(repo.live_search().await);
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("locale.json"), "###").unwrap();
        let repo = JsonPreferencesRepository::new(SlotStorage::new(temp_dir.path().to_path_buf()));

        repo.set_live_search(true).await.unwrap();
        assert_eq!(repo.locale().await, None);
        assert!(repo.live_search().await);
    }
}

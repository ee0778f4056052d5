//! Repository traits for persisted application state.
//!
//! These seams decouple the core from the storage mechanism. All persisted
//! state is best-effort: reads degrade to an empty/default value and writes
//! may fail without aborting the session (callers log and continue).

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::Result;
use crate::locale::Locale;

/// Persistence for the ordered selection list.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Overwrites the single selection slot with the ordered product list.
    async fn save(&self, products: &[Product]) -> Result<()>;

    /// Reads the persisted selection.
    ///
    /// Returns an empty list when the slot is absent, unreadable, or fails
    /// to parse; implementations log the condition and never error.
    async fn load(&self) -> Vec<Product>;
}

/// Persistence for user preferences: active locale and the live-search flag.
///
/// The two slots are independently readable and writable; a failure on one
/// never affects the other.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// The persisted locale, if a valid one was stored.
    async fn locale(&self) -> Option<Locale>;

    async fn set_locale(&self, locale: Locale) -> Result<()>;

    /// The persisted live-search flag; absent or corrupt reads as false.
    async fn live_search(&self) -> bool;

    async fn set_live_search(&self, enabled: bool) -> Result<()>;
}

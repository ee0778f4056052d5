//! Selection persistence over a JSON slot.
//!
//! The `selection` slot holds the ordered list of full product records.
//! Corruption policy per the repository contract: a slot that is absent,
//! unreadable, or malformed reads as an empty selection (logged, never
//! surfaced); a failed write is reported to the caller, who logs and
//! continues.

use async_trait::async_trait;

use ritu_core::catalog::Product;
use ritu_core::error::{Result, RituError};
use ritu_core::repository::SelectionRepository;

use crate::storage::SlotStorage;

const SELECTION_SLOT: &str = "selection";

/// `SelectionRepository` backed by [`SlotStorage`].
pub struct JsonSelectionRepository {
    storage: SlotStorage,
}

impl JsonSelectionRepository {
    pub fn new(storage: SlotStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SelectionRepository for JsonSelectionRepository {
    async fn save(&self, products: &[Product]) -> Result<()> {
        self.storage
            .save(SELECTION_SLOT, &products)
            .map_err(|e| RituError::persistence_write(SELECTION_SLOT, e.to_string()))
    }

    async fn load(&self) -> Vec<Product> {
        match self.storage.load::<Vec<Product>>(SELECTION_SLOT) {
            Ok(Some(products)) => products,
            Ok(None) => Vec::new(),
            Err(e) => {
                // Treated as a non-fatal reset, not a crash.
                tracing::warn!(slot = SELECTION_SLOT, error = %e, "discarding unreadable selection slot");
                Vec::new()
            }
        }
    }
}

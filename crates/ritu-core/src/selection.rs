//! The user's working set of chosen products.
//!
//! The selection set enforces id uniqueness, preserves insertion order (which
//! is the display order), and emits a change event for every mutation so the
//! rendering surface and the notification sink stay in sync.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::{Catalog, Product};
use crate::error::{Result, RituError};

/// Change notification emitted by every mutating call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A product was appended to the selection.
    Added { product: Product },
    /// A product was removed from the selection.
    Removed { product: Product },
    /// The whole selection was emptied.
    Cleared,
}

/// Result of a successful toggle.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// True when the product was added, false when it was removed.
    pub added: bool,
    pub product: Product,
}

/// Ordered, id-unique collection of selected products.
///
/// Mutations validate ids against the catalog; an id that does not resolve
/// leaves the set untouched and reports `UnknownProduct`.
#[derive(Default)]
pub struct SelectionSet {
    products: Vec<Product>,
    events: Option<UnboundedSender<SelectionEvent>>,
}

impl SelectionSet {
    /// Creates an empty selection with no event subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the change-event channel. Events for mutations before this
    /// call are not replayed.
    pub fn set_event_sender(&mut self, sender: UnboundedSender<SelectionEvent>) {
        self.events = Some(sender);
    }

    fn emit(&self, event: SelectionEvent) {
        if let Some(sender) = &self.events {
            // The receiver half living shorter than the set is fine.
            let _ = sender.send(event);
        }
    }

    /// Adds the product when absent, removes it when present.
    ///
    /// Fails with `UnknownProduct` when the id does not resolve in the
    /// catalog; the set is left unchanged in that case.
    pub fn toggle(&mut self, catalog: &Catalog, id: u32) -> Result<ToggleOutcome> {
        let product = catalog
            .get(id)
            .ok_or(RituError::UnknownProduct { id })?
            .clone();

        match self.products.iter().position(|p| p.id == id) {
            None => {
                self.products.push(product.clone());
                self.emit(SelectionEvent::Added {
                    product: product.clone(),
                });
                Ok(ToggleOutcome {
                    added: true,
                    product,
                })
            }
            Some(index) => {
                // Vec::remove keeps the relative order of the remainder.
                let product = self.products.remove(index);
                self.emit(SelectionEvent::Removed {
                    product: product.clone(),
                });
                Ok(ToggleOutcome {
                    added: false,
                    product,
                })
            }
        }
    }

    /// Empties the selection unconditionally.
    pub fn clear(&mut self) {
        self.products.clear();
        self.emit(SelectionEvent::Cleared);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Read-only view in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<u32> {
        self.products.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replaces the selection with persisted state, dropping entries whose id
    /// no longer resolves in the catalog. Emits no per-item events.
    ///
    /// Returns how many entries were dropped.
    pub fn restore(&mut self, catalog: &Catalog, persisted: Vec<Product>) -> usize {
        let before = persisted.len();
        let mut seen = Vec::new();
        self.products = persisted
            .into_iter()
            .filter(|p| {
                if catalog.contains(p.id) && !seen.contains(&p.id) {
                    seen.push(p.id);
                    true
                } else {
                    false
                }
            })
            .collect();
        before - self.products.len()
    }
}

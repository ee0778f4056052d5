//! Error types for the Ritu application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Ritu application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RituError {
    /// The product catalog could not be fetched or parsed at startup.
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// A persisted slot could not be read.
    #[error("Persistence read failed for slot '{slot}': {message}")]
    PersistenceRead { slot: String, message: String },

    /// A persisted slot could not be written.
    #[error("Persistence write failed for slot '{slot}': {message}")]
    PersistenceWrite { slot: String, message: String },

    /// An operation named a product id absent from the catalog.
    #[error("Unknown product reference: {id}")]
    UnknownProduct { id: u32 },

    /// Routine generation was requested with nothing selected.
    #[error("No products selected")]
    EmptySelection,

    /// The completion endpoint failed or returned a malformed reply.
    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(String),

    /// A submission path already has a request in flight.
    #[error("A '{path}' request is already in flight")]
    Busy { path: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RituError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a CatalogLoad error
    pub fn catalog_load(message: impl Into<String>) -> Self {
        Self::CatalogLoad(message.into())
    }

    /// Creates a PersistenceRead error
    pub fn persistence_read(slot: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PersistenceRead {
            slot: slot.into(),
            message: message.into(),
        }
    }

    /// Creates a PersistenceWrite error
    pub fn persistence_write(slot: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PersistenceWrite {
            slot: slot.into(),
            message: message.into(),
        }
    }

    /// Creates an UnknownProduct error
    pub fn unknown_product(id: u32) -> Self {
        Self::UnknownProduct { id }
    }

    /// Creates an AssistantUnavailable error
    pub fn assistant_unavailable(message: impl Into<String>) -> Self {
        Self::AssistantUnavailable(message.into())
    }

    /// Creates a Busy error
    pub fn busy(path: impl Into<String>) -> Self {
        Self::Busy { path: path.into() }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownProduct error
    pub fn is_unknown_product(&self) -> bool {
        matches!(self, Self::UnknownProduct { .. })
    }

    /// Check if this is an EmptySelection error
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::EmptySelection)
    }

    /// Check if this is an AssistantUnavailable error
    pub fn is_assistant_unavailable(&self) -> bool {
        matches!(self, Self::AssistantUnavailable(_))
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this error belongs to a peripheral concern that must degrade
    /// silently (persistence failures are logged, never surfaced).
    pub fn is_peripheral(&self) -> bool {
        matches!(
            self,
            Self::PersistenceRead { .. } | Self::PersistenceWrite { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RituError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RituError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RituError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RituError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for RituError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, RituError>`.
pub type Result<T> = std::result::Result<T, RituError>;

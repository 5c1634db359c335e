//! Durable local storage abstraction for the cart.
//!
//! The cart store does not know where its state lives. Embedding clients
//! provide a [`CartStorage`] backend: the terminal client uses a JSON file
//! in the user's data directory, tests use [`MemoryStorage`].
//!
//! Storage is same-process, sequential, fire-and-forget. If two clients
//! share one backend, last write wins; there is no reconciliation.

use serde::{Deserialize, Serialize};

use super::CartLine;

/// Errors a storage backend can report.
///
/// None of these are fatal to the cart: a read failure loads an empty
/// cart, a write failure degrades the store to session-only operation.
#[derive(thiserror::Error, Debug, Clone)]
pub enum StorageError {
    /// The stored record could not be read.
    #[error("cart storage read failed: {0}")]
    Read(String),
    /// The record could not be written (quota exceeded, storage disabled, ...).
    #[error("cart storage write failed: {0}")]
    Write(String),
}

/// A durable key-value slot holding one serialized cart record.
pub trait CartStorage {
    /// Load the raw persisted record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backend is unreadable. The
    /// store treats this the same as a missing record.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the record cannot be persisted.
    fn save(&mut self, payload: &str) -> Result<(), StorageError>;
}

/// Current version of the persisted cart schema.
pub const PERSISTED_CART_VERSION: u32 = 1;

/// The serialized cart record.
///
/// The schema is versioned so a legacy or foreign record is detected and
/// discarded instead of crashing deserialization consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedCart {
    /// Schema version, see [`PERSISTED_CART_VERSION`].
    pub version: u32,
    /// Cart lines in insertion order.
    pub lines: Vec<CartLine>,
}

/// In-memory storage backend.
///
/// Used in tests and as a stand-in when no durable backend exists; state
/// lives only as long as the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Option<String>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub const fn new() -> Self {
        Self { record: None }
    }

    /// Create a backend pre-loaded with a raw record (for corrupt-state tests).
    #[must_use]
    pub const fn with_record(record: String) -> Self {
        Self {
            record: Some(record),
        }
    }

    /// The currently stored raw record.
    #[must_use]
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        self.record = Some(payload.to_owned());
        Ok(())
    }
}

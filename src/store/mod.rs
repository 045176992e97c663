//! Document Store Gateway - narrow interface to a remote key-addressed
//! document store.
//!
//! Two logical tables, identified by fixed names, each holding exactly
//! one record (`id = 1`). The store is an injected dependency: construct
//! it once at startup and clone a handle into every component that needs
//! one, which is also what makes an in-memory substitute usable in
//! tests.

mod in_memory;

use std::fmt;

use crate::document::Document;

/// Fixed id of the single record each document table holds.
pub const RECORD_ID: u64 = 1;

/// Gateway to the backing document store.
pub trait DocumentStore: Send + Sync {
    /// Fetch the singleton record from the document's table. Returns
    /// `None` when the table has no record yet.
    fn get<D: Document>(&self) -> Result<Option<D>, StoreError>;

    /// Replace the singleton record wholesale with `document`.
    fn upsert<D: Document>(&self, document: &D) -> Result<(), StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    Unavailable(String),
    /// Document (de)serialization failed.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryStore;

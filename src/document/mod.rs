//! Documents - whole-record blobs replaced wholesale on every persisted
//! write.
//!
//! Each document type owns exactly one record in its table; a flush
//! clones the live document and ships the clone to the store, so the
//! persisted copy is always a complete snapshot, never a field-level
//! patch.

mod catalog;
mod list;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for singleton documents persisted through a
/// [`DocumentStore`](crate::DocumentStore).
pub trait Document: Clone + Serialize + DeserializeOwned + Send {
    /// The table name for this document type.
    const TABLE: &'static str;
}

pub use catalog::Catalog;
pub use list::ShoppingList;

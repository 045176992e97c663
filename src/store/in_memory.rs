//! InMemoryStore - HashMap-backed document store for testing and
//! single-process use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use super::{DocumentStore, StoreError, RECORD_ID};
use crate::document::Document;

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"TABLE:id"`, value is the document's JSON bytes.
/// Clone-friendly via Arc: clones share storage, so a clone handed to a
/// background worker writes the same map the test later reads. The store
/// also keeps an append-only log of applied upserts for assertions.
///
/// ## Example
///
/// ```
/// use shoplist::{DocumentStore, InMemoryStore, ShoppingList};
///
/// let store = InMemoryStore::new();
/// let mut list = ShoppingList::new();
/// list.add("milk");
///
/// store.upsert(&list).unwrap();
/// assert_eq!(store.get::<ShoppingList>().unwrap(), Some(list));
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    upserts: Arc<Mutex<Vec<String>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            upserts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn make_key(table: &str) -> String {
        format!("{}:{}", table, RECORD_ID)
    }

    /// Table names of every applied upsert, in application order.
    pub fn upsert_log(&self) -> Vec<String> {
        self.upserts.lock().unwrap().clone()
    }

    /// Number of upserts applied against one table.
    pub fn upserts_to(&self, table: &str) -> usize {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .filter(|applied| applied.as_str() == table)
            .count()
    }
}

impl DocumentStore for InMemoryStore {
    fn get<D: Document>(&self) -> Result<Option<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        match storage.get(&Self::make_key(D::TABLE)) {
            Some(bytes) => {
                let document = serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    fn upsert<D: Document>(&self, document: &D) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(document).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        storage.insert(Self::make_key(D::TABLE), bytes);

        self.upserts
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?
            .push(D::TABLE.to_string());
        Ok(())
    }
}

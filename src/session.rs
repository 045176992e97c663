//! Session - the authoritative in-process copies of both documents, the
//! mutation operations, and the periodic flush trigger.
//!
//! After the initial load every read is served from the session; the
//! store is never re-fetched, so a read can never observe a snapshot
//! older than the in-memory state. Every mutation operation enqueues a
//! full snapshot of the touched document as its final step, without
//! checking whether the content actually changed; whole-record upserts
//! make redundant snapshots harmless.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::balance::{split_categories, Columns};
use crate::category::{Category, InvalidCategory};
use crate::document::{Catalog, ShoppingList};
use crate::flush::FlushHandle;
use crate::store::{DocumentStore, StoreError};

/// How long the persisted copy may trail the in-memory copy before the
/// periodic trigger forces a flush of both documents.
pub const WRITE_INTERVAL: Duration = Duration::from_secs(300);

/// Error type for session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A category name outside the fixed enumeration was given.
    InvalidCategory(String),
    /// The initial load could not reach the store.
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidCategory(name) => write!(f, "unknown category: {}", name),
            SessionError::Store(err) => write!(f, "store error: {}", err),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<InvalidCategory> for SessionError {
    fn from(err: InvalidCategory) -> Self {
        SessionError::InvalidCategory(err.0)
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Store(err)
    }
}

/// The interactive session: shopping list, catalog, the transient
/// selection set, and one flush handle per document.
///
/// Store failures never surface from a mutation; the background worker
/// logs and drops the failed snapshot, and the next flush supersedes it.
///
/// ## Example
///
/// ```
/// use shoplist::{Catalog, DocumentStore, FlushWorker, InMemoryStore, Session, ShoppingList};
///
/// let store = InMemoryStore::new();
/// let list_worker = FlushWorker::<ShoppingList>::spawn(store.clone());
/// let catalog_worker = FlushWorker::<Catalog>::spawn(store.clone());
///
/// let mut session =
///     Session::load(&store, list_worker.handle(), catalog_worker.handle()).unwrap();
/// session.add_to_list("milk");
/// session.add_to_catalog("Dairy & Eggs", "eggs").unwrap();
///
/// list_worker.stop();
/// catalog_worker.stop();
/// assert!(store.get::<ShoppingList>().unwrap().unwrap().contains("Milk"));
/// ```
#[derive(Debug)]
pub struct Session {
    list: ShoppingList,
    catalog: Catalog,
    selection: Vec<String>,
    list_flush: FlushHandle<ShoppingList>,
    catalog_flush: FlushHandle<Catalog>,
    write_interval: Duration,
    last_write: Instant,
}

impl Session {
    /// Create a session over already-loaded documents.
    pub fn new(
        list: ShoppingList,
        catalog: Catalog,
        list_flush: FlushHandle<ShoppingList>,
        catalog_flush: FlushHandle<Catalog>,
    ) -> Self {
        Session {
            list,
            catalog,
            selection: Vec::new(),
            list_flush,
            catalog_flush,
            write_interval: WRITE_INTERVAL,
            last_write: Instant::now(),
        }
    }

    /// Load both documents from the store and build the session.
    ///
    /// An absent record starts empty. Display casing is re-derived and
    /// each catalog category sorted, so a record written by an older
    /// code path comes back presentable. The one synchronous store
    /// round-trip the session ever makes; on failure the caller shows a
    /// notice and may fall back to [`Session::new`] with empty
    /// documents.
    pub fn load<S: DocumentStore>(
        store: &S,
        list_flush: FlushHandle<ShoppingList>,
        catalog_flush: FlushHandle<Catalog>,
    ) -> Result<Self, SessionError> {
        let mut list = store.get::<ShoppingList>()?.unwrap_or_default();
        list.canonicalize();

        let mut catalog = store.get::<Catalog>()?.unwrap_or_default();
        catalog.canonicalize();

        info!(
            "session loaded: {} list items, {} catalog items",
            list.len(),
            catalog.total_items()
        );

        Ok(Session::new(list, catalog, list_flush, catalog_flush))
    }

    /// Override the periodic flush interval. Tests use a short one.
    pub fn with_write_interval(mut self, interval: Duration) -> Self {
        self.write_interval = interval;
        self
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Add an item to the shopping list. A duplicate of the normalized
    /// display form is a no-op, not an error; blank input is ignored.
    pub fn add_to_list(&mut self, item: &str) {
        let item = item.trim();
        if item.is_empty() {
            return;
        }
        self.list.add(item);
        self.flush_list();
    }

    /// Remove the exact entry from the shopping list; no-op when absent.
    pub fn remove_from_list(&mut self, item: &str) {
        self.list.remove(item);
        self.flush_list();
    }

    /// Add an item to a catalog category, named by its display name.
    /// Rejects names outside the fixed enumeration; a duplicate within
    /// the category is a no-op.
    pub fn add_to_catalog(&mut self, category: &str, item: &str) -> Result<(), SessionError> {
        let category: Category = category.parse()?;
        let item = item.trim();
        if item.is_empty() {
            return Ok(());
        }
        self.catalog.add(category, item);
        self.flush_catalog();
        Ok(())
    }

    /// Mark an item checked in the catalog view. Idempotent.
    pub fn select(&mut self, item: &str) {
        let item = item.to_string();
        if !self.selection.contains(&item) {
            self.selection.push(item);
        }
    }

    /// Uncheck everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Add every selected item to the shopping list, then clear the
    /// selection. One batch, one list flush.
    pub fn add_selection_to_list(&mut self) {
        for item in std::mem::take(&mut self.selection) {
            self.list.add(&item);
        }
        self.flush_list();
    }

    /// Remove each selected item from the catalog, at most one
    /// occurrence per item (the first category in display order wins),
    /// then clear the selection. One batch, one catalog flush.
    pub fn remove_selection_from_catalog(&mut self) {
        for item in std::mem::take(&mut self.selection) {
            self.catalog.remove_first(item.trim());
        }
        self.flush_catalog();
    }

    /// Enqueue full snapshots of both documents, regardless of whether
    /// they changed, and reset the periodic clock.
    pub fn flush_now(&mut self) {
        self.list_flush.enqueue(self.list.clone());
        self.catalog_flush.enqueue(self.catalog.clone());
        self.last_write = Instant::now();
    }

    /// The periodic flush trigger: call once per interactive cycle.
    ///
    /// Every mutation already flushes, so this is a pure safety net
    /// bounding staleness when the session sits idle.
    pub fn tick(&mut self) {
        if self.last_write.elapsed() >= self.write_interval {
            debug!("periodic flush after {:?} idle", self.write_interval);
            self.flush_now();
        }
    }

    /// Lay the categories out into columns weighted by the live
    /// catalog's item counts.
    pub fn column_layout(&self, columns: Columns) -> Vec<Vec<Category>> {
        split_categories(&Category::ALL, &self.catalog.item_counts(), columns)
    }

    // Mutation flushes leave `last_write` alone: the clock tracks the
    // periodic trigger only.
    fn flush_list(&mut self) {
        self.list_flush.enqueue(self.list.clone());
    }

    fn flush_catalog(&mut self) {
        self.catalog_flush.enqueue(self.catalog.clone());
    }
}

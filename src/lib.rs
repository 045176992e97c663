mod balance;
mod category;
mod document;
mod flush;
mod session;
mod store;
mod titlecase;

pub use balance::{split_categories, Columns};
pub use category::{Category, InvalidCategory};
pub use document::{Catalog, Document, ShoppingList};
pub use flush::{FlushHandle, FlushStats, FlushWorker};
pub use session::{Session, SessionError, WRITE_INTERVAL};
pub use store::{DocumentStore, InMemoryStore, StoreError, RECORD_ID};
pub use titlecase::normalize;

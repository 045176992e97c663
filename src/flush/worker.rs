//! Background persistence worker, one per document type.

use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};

use log::error;

use super::{FlushHandle, FlushMessage};
use crate::document::Document;
use crate::store::DocumentStore;

/// Statistics from a flush worker.
#[derive(Debug, Default, Clone)]
pub struct FlushStats {
    /// Snapshots received from the queue.
    pub received: usize,
    /// Snapshots successfully upserted.
    pub applied: usize,
    /// Snapshots whose upsert failed (logged and dropped).
    pub failed: usize,
}

/// A background thread that drains one document type's flush queue and
/// upserts each snapshot to the store.
///
/// The loop blocks on the channel, so an idle worker consumes nothing.
/// A failed upsert is logged and dropped, never retried: the next
/// snapshot is a full replacement and supersedes it. One store failure
/// therefore never kills the worker.
///
/// `stop()` is the graceful path: the shutdown marker travels the same
/// channel as the snapshots, so everything enqueued before it is
/// flushed first. Dropping the worker only signals shutdown without
/// joining, which keeps the thread from blocking process exit.
///
/// ## Example
///
/// ```
/// use shoplist::{DocumentStore, FlushWorker, InMemoryStore, ShoppingList};
///
/// let store = InMemoryStore::new();
/// let worker = FlushWorker::<ShoppingList>::spawn(store.clone());
/// let flush = worker.handle();
///
/// let mut list = ShoppingList::new();
/// list.add("milk");
/// flush.enqueue(list.clone());
///
/// let stats = worker.stop();
/// assert_eq!(stats.applied, 1);
/// assert_eq!(store.get::<ShoppingList>().unwrap(), Some(list));
/// ```
pub struct FlushWorker<D> {
    tx: Sender<FlushMessage<D>>,
    handle: Option<JoinHandle<FlushStats>>,
}

impl<D: Document + 'static> FlushWorker<D> {
    /// Spawn a worker draining snapshots of `D` into `store`.
    ///
    /// The store is moved into the worker thread; clone a handle first
    /// when the caller still needs one.
    pub fn spawn<S>(store: S) -> Self
    where
        S: DocumentStore + 'static,
    {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = FlushStats::default();

            loop {
                match rx.recv() {
                    Ok(FlushMessage::Snapshot(snapshot)) => {
                        stats.received += 1;
                        match store.upsert(&snapshot) {
                            Ok(()) => stats.applied += 1,
                            Err(err) => {
                                stats.failed += 1;
                                error!("flush of {} failed: {}", D::TABLE, err);
                            }
                        }
                    }
                    // Producers are gone or shutdown was requested.
                    Ok(FlushMessage::Shutdown) | Err(_) => break,
                }
            }

            stats
        });

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// A producer handle feeding this worker's queue.
    pub fn handle(&self) -> FlushHandle<D> {
        FlushHandle::new(self.tx.clone())
    }

    /// Flush everything already enqueued, stop the worker, and return
    /// its statistics.
    pub fn stop(mut self) -> FlushStats {
        let _ = self.tx.send(FlushMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap_or_default()
        } else {
            FlushStats::default()
        }
    }

    /// Signal the worker to stop without waiting.
    pub fn signal_stop(&self) {
        let _ = self.tx.send(FlushMessage::Shutdown);
    }
}

impl<D> Drop for FlushWorker<D> {
    fn drop(&mut self) {
        let _ = self.tx.send(FlushMessage::Shutdown);
        // Don't join on drop - the worker is daemonic and must not block
        // process shutdown.
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::document::ShoppingList;
    use crate::store::{InMemoryStore, StoreError};

    /// Store that fails the first `fail_first` upserts, then delegates.
    #[derive(Clone)]
    struct FlakyStore {
        inner: InMemoryStore,
        failures_left: Arc<Mutex<usize>>,
    }

    impl FlakyStore {
        fn new(inner: InMemoryStore, fail_first: usize) -> Self {
            Self {
                inner,
                failures_left: Arc::new(Mutex::new(fail_first)),
            }
        }
    }

    impl DocumentStore for FlakyStore {
        fn get<D: Document>(&self) -> Result<Option<D>, StoreError> {
            self.inner.get()
        }

        fn upsert<D: Document>(&self, document: &D) -> Result<(), StoreError> {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(StoreError::Unavailable("injected failure".into()));
            }
            self.inner.upsert(document)
        }
    }

    fn list_of(items: &[&str]) -> ShoppingList {
        let mut list = ShoppingList::new();
        for item in items {
            list.add(item);
        }
        list
    }

    #[test]
    fn snapshots_are_applied_in_enqueue_order() {
        let store = InMemoryStore::new();
        let worker = FlushWorker::<ShoppingList>::spawn(store.clone());
        let flush = worker.handle();

        flush.enqueue(list_of(&["milk"]));
        flush.enqueue(list_of(&["milk", "bread"]));
        flush.enqueue(list_of(&["milk", "bread", "coffee"]));

        let stats = worker.stop();

        assert_eq!(stats.received, 3);
        assert_eq!(stats.applied, 3);
        assert_eq!(stats.failed, 0);
        // FIFO: the store holds the last snapshot.
        assert_eq!(
            store.get::<ShoppingList>().unwrap(),
            Some(list_of(&["milk", "bread", "coffee"]))
        );
        assert_eq!(store.upserts_to(ShoppingList::TABLE), 3);
    }

    #[test]
    fn one_failure_never_kills_the_worker() {
        let store = InMemoryStore::new();
        let flaky = FlakyStore::new(store.clone(), 1);
        let worker = FlushWorker::<ShoppingList>::spawn(flaky);
        let flush = worker.handle();

        flush.enqueue(list_of(&["milk"]));
        flush.enqueue(list_of(&["milk", "bread"]));

        let stats = worker.stop();

        assert_eq!(stats.received, 2);
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.failed, 1);
        // The second snapshot caught the store up past the dropped one.
        assert_eq!(
            store.get::<ShoppingList>().unwrap(),
            Some(list_of(&["milk", "bread"]))
        );
    }

    #[test]
    fn enqueue_after_stop_is_dropped_silently() {
        let store = InMemoryStore::new();
        let worker = FlushWorker::<ShoppingList>::spawn(store.clone());
        let flush = worker.handle();

        worker.stop();
        flush.enqueue(list_of(&["milk"]));

        assert_eq!(store.get::<ShoppingList>().unwrap(), None);
    }

    #[test]
    fn stop_with_nothing_enqueued_returns_zero_stats() {
        let store = InMemoryStore::new();
        let worker = FlushWorker::<ShoppingList>::spawn(store);

        let stats = worker.stop();

        assert_eq!(stats.received, 0);
        assert_eq!(stats.applied, 0);
        assert_eq!(stats.failed, 0);
    }
}

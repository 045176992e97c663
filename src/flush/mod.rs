//! Write coalescing: one FIFO channel and one background worker per
//! document type.
//!
//! Mutations clone the live document and hand the snapshot to a
//! [`FlushHandle`]; the paired [`FlushWorker`] drains the channel and
//! upserts each snapshot to the store. Because every upsert replaces the
//! whole record, a snapshot that fails to apply is harmless: the next
//! successful one catches the store up.

mod worker;

use std::sync::mpsc::Sender;

use log::warn;

use crate::document::Document;

/// A message on a worker's channel.
pub(crate) enum FlushMessage<D> {
    Snapshot(D),
    Shutdown,
}

/// Producer side of a document's flush queue.
///
/// Cheap to clone; every clone feeds the same worker. Enqueueing never
/// blocks and never fails: the channel is unbounded, and a snapshot sent
/// after the worker has gone is dropped with a warning.
#[derive(Debug)]
pub struct FlushHandle<D> {
    tx: Sender<FlushMessage<D>>,
}

impl<D> Clone for FlushHandle<D> {
    fn clone(&self) -> Self {
        FlushHandle {
            tx: self.tx.clone(),
        }
    }
}

impl<D: Document> FlushHandle<D> {
    pub(crate) fn new(tx: Sender<FlushMessage<D>>) -> Self {
        FlushHandle { tx }
    }

    /// Enqueue a snapshot for persistence.
    pub fn enqueue(&self, snapshot: D) {
        if self.tx.send(FlushMessage::Snapshot(snapshot)).is_err() {
            warn!("flush worker for {} is gone, snapshot dropped", D::TABLE);
        }
    }
}

pub use worker::{FlushStats, FlushWorker};

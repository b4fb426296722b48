//! Fan-out progress reporter for concurrent observers.
//!
//! Backed by a `tokio::sync::broadcast` channel: `notify` never blocks, and
//! updates sent while nobody is subscribed are dropped. Lagging observers
//! lose the oldest updates rather than slowing the pipeline.

use csm_common::ProgressUpdate;
use tokio::sync::broadcast;

use crate::application::ports::ProgressReporter;

/// Default number of buffered updates per observer.
pub const DEFAULT_CAPACITY: usize = 256;

/// Cloneable broadcast reporter. Every clone feeds the same observers.
#[derive(Clone)]
pub struct BroadcastReporter {
    tx: broadcast::Sender<ProgressUpdate>,
}

impl BroadcastReporter {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Register a new observer. It sees updates sent from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressUpdate> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastReporter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ProgressReporter for BroadcastReporter {
    fn notify(&self, update: &ProgressUpdate) {
        // Err only means nobody is listening.
        let _ = self.tx.send(update.clone());
    }
}

//! Fire-and-forget persistence
//!
//! Each preference store owns one [`Persister`]: a handle to a detached tokio task
//! that drains a FIFO queue of writes. Callers enqueue and return immediately.
//! Writes are attempted exactly once and in enqueue order, so when two changes race
//! the last one enqueued is also the last one written. Failures are logged, never
//! retried, and never reported back to the caller.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace};

use crate::storage::SharedStore;

enum PersistCommand {
    Write { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Handle to a background persistence task
#[derive(Clone)]
pub struct Persister {
    name: &'static str,
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl Persister {
    /// Spawn the persistence task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(name: &'static str, storage: SharedStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(persistence_task(name, storage, rx));
        Self { name, tx }
    }

    /// Queue a write without waiting for it
    pub fn persist(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let cmd = PersistCommand::Write {
            key: key.clone(),
            value: value.into(),
        };
        if self.tx.send(cmd).is_err() {
            error!(store = self.name, key = %key, "persistence task stopped; write dropped");
        }
    }

    /// Wait until every write queued before this call has been attempted
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

async fn persistence_task(
    name: &'static str,
    storage: SharedStore,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            PersistCommand::Write { key, value } => match storage.set(&key, &value).await {
                Ok(()) => trace!(store = name, key = %key, value = %value, "persisted"),
                Err(err) => {
                    error!(store = name, key = %key, error = %err, "failed to persist preference")
                }
            },
            PersistCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!(store = name, "persistence task finished");
}

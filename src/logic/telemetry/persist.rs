//! Background Persistence Worker
//!
//! Single-writer worker that owns the blob store on a dedicated thread.
//! Every mutation submits a full-collection snapshot; jobs are processed
//! strictly in submission order, so a clear is just another write of an
//! empty collection and a stale in-flight write can never clobber newer
//! state.
//!
//! Writes are fire-and-forget from the caller's perspective: a failed write
//! is logged and surfaced through `last_error()`, never rolled back into the
//! in-memory collections.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use serde::Serialize;

use crate::logic::baseline::NetworkBaseline;
use crate::logic::storage::{BlobStore, KEY_ANOMALIES, KEY_BASELINE, KEY_EVENTS};

use super::anomaly::NetworkAnomaly;
use super::event::NetworkEvent;

/// One durable write. Snapshots are full collections, not deltas.
pub enum PersistJob {
    Events(Vec<NetworkEvent>),
    Anomalies(Vec<NetworkAnomaly>),
    Baseline(Option<NetworkBaseline>),
    /// Ack once every previously submitted job has been processed
    Flush(mpsc::Sender<()>),
}

pub struct PersistWorker {
    tx: Option<mpsc::Sender<PersistJob>>,
    handle: Option<JoinHandle<()>>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl PersistWorker {
    /// Spawn the worker thread; it owns `store` until shutdown.
    pub fn spawn(store: Box<dyn BlobStore>) -> Self {
        let (tx, rx) = mpsc::channel::<PersistJob>();
        let last_error = Arc::new(Mutex::new(None));
        let worker_error = Arc::clone(&last_error);

        let handle = std::thread::spawn(move || {
            for job in rx {
                match job {
                    PersistJob::Events(events) => {
                        write_blob(&*store, KEY_EVENTS, &events, &worker_error);
                    }
                    PersistJob::Anomalies(anomalies) => {
                        write_blob(&*store, KEY_ANOMALIES, &anomalies, &worker_error);
                    }
                    PersistJob::Baseline(baseline) => {
                        write_blob(&*store, KEY_BASELINE, &baseline, &worker_error);
                    }
                    PersistJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            log::debug!("Persistence worker stopped");
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
            last_error,
        }
    }

    /// Queue a write. Never blocks on I/O; a worker that already exited
    /// drops the job with a logged error.
    pub fn submit(&self, job: PersistJob) {
        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                log::error!("Persistence worker is gone, dropping write");
            }
        }
    }

    /// Block until every previously queued write has been processed
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.submit(PersistJob::Flush(ack_tx));
        let _ = ack_rx.recv();
    }

    /// Most recent write failure, cleared by the next successful write
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain the queue and exit.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn write_blob<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    value: &T,
    last_error: &Mutex<Option<String>>,
) {
    let result = serde_json::to_vec(value)
        .map_err(|e| e.to_string())
        .and_then(|bytes| store.set(key, &bytes).map_err(|e| e.to_string()));

    match result {
        Ok(()) => *last_error.lock() = None,
        Err(e) => {
            log::error!("Persist write for '{}' failed: {}", key, e);
            *last_error.lock() = Some(e);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

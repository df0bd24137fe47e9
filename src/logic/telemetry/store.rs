//! Event Store
//!
//! Append-mostly store with two independently bounded collections (events,
//! anomalies). In-memory state is the source of truth; every mutation
//! schedules an asynchronous full-snapshot write through the persistence
//! worker. Capacity trim runs before age trim on every append, so an
//! old-but-within-capacity entry can still be evicted by the age check on
//! the same call.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::logic::baseline::NetworkBaseline;
use crate::logic::storage::{BlobStore, KEY_ANOMALIES, KEY_EVENTS};
use crate::logic::threat::ThreatLevel;

use super::anomaly::NetworkAnomaly;
use super::event::NetworkEvent;
use super::exporter;
use super::persist::{PersistJob, PersistWorker};

// ============================================================================
// LIMITS
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct StoreLimits {
    pub max_events: usize,
    pub max_anomalies: usize,
    pub retention_days: i64,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_events: crate::constants::get_max_stored_events(),
            max_anomalies: crate::constants::get_max_stored_anomalies(),
            retention_days: crate::constants::get_event_retention_days(),
        }
    }
}

// ============================================================================
// EVENT STORE
// ============================================================================

#[derive(Default)]
struct StoreState {
    events: Vec<NetworkEvent>,
    anomalies: Vec<NetworkAnomaly>,
}

/// Bounded, retention-governed history of events and anomalies.
///
/// All mutations go through one mutual-exclusion domain, preserving the
/// size invariants even when a timer tick races a manual check.
pub struct EventStore {
    state: Mutex<StoreState>,
    limits: StoreLimits,
    persist: PersistWorker,
}

impl EventStore {
    /// Restore persisted history from the blob store, then hand the store to
    /// the persistence worker. Malformed or missing blobs start empty with a
    /// logged warning, never an error.
    pub fn restore(blob_store: Box<dyn BlobStore>, limits: StoreLimits) -> Self {
        let events = read_collection::<NetworkEvent>(&*blob_store, KEY_EVENTS);
        let anomalies = read_collection::<NetworkAnomaly>(&*blob_store, KEY_ANOMALIES);
        log::info!(
            "Restored {} events, {} anomalies from durable storage",
            events.len(),
            anomalies.len()
        );

        Self {
            state: Mutex::new(StoreState { events, anomalies }),
            limits,
            persist: PersistWorker::spawn(blob_store),
        }
    }

    /// In-memory store without restore, for embedders that persist elsewhere
    pub fn with_store(blob_store: Box<dyn BlobStore>, limits: StoreLimits) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            limits,
            persist: PersistWorker::spawn(blob_store),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append an event, trim to capacity and retention, schedule a write
    pub fn append(&self, event: NetworkEvent) {
        let snapshot = {
            let mut state = self.state.lock();
            state.events.push(event);

            // Capacity first: drop the oldest entries beyond the cap.
            if state.events.len() > self.limits.max_events {
                let excess = state.events.len() - self.limits.max_events;
                state.events.drain(..excess);
            }

            // Then age: nothing older than the retention window survives.
            let cutoff = Utc::now() - Duration::days(self.limits.retention_days);
            state.events.retain(|e| e.timestamp >= cutoff);

            state.events.clone()
        };
        self.persist.submit(PersistJob::Events(snapshot));
    }

    /// Symmetric to `append`, bounded by `max_anomalies`
    pub fn append_anomaly(&self, anomaly: NetworkAnomaly) {
        let snapshot = {
            let mut state = self.state.lock();
            state.anomalies.push(anomaly);

            if state.anomalies.len() > self.limits.max_anomalies {
                let excess = state.anomalies.len() - self.limits.max_anomalies;
                state.anomalies.drain(..excess);
            }

            let cutoff = Utc::now() - Duration::days(self.limits.retention_days);
            state.anomalies.retain(|a| a.start_time >= cutoff);

            state.anomalies.clone()
        };
        self.persist.submit(PersistJob::Anomalies(snapshot));
    }

    /// Empty both collections and persist the empty state.
    ///
    /// The worker processes writes in submission order, so this cannot be
    /// overtaken by an earlier in-flight snapshot.
    pub fn clear_all(&self) {
        {
            let mut state = self.state.lock();
            state.events.clear();
            state.anomalies.clear();
        }
        self.persist.submit(PersistJob::Events(Vec::new()));
        self.persist.submit(PersistJob::Anomalies(Vec::new()));
    }

    /// Persist the baseline blob through the same ordered writer
    pub fn persist_baseline(&self, baseline: Option<NetworkBaseline>) {
        self.persist.submit(PersistJob::Baseline(baseline));
    }

    // ------------------------------------------------------------------
    // Reads (synchronous, latest in-memory snapshot)
    // ------------------------------------------------------------------

    pub fn events(&self) -> Vec<NetworkEvent> {
        self.state.lock().events.clone()
    }

    pub fn anomalies(&self) -> Vec<NetworkAnomaly> {
        self.state.lock().anomalies.clone()
    }

    pub fn event_count(&self) -> usize {
        self.state.lock().events.len()
    }

    pub fn anomaly_count(&self) -> usize {
        self.state.lock().anomalies.len()
    }

    /// Events at exactly the given threat level
    pub fn events_by_level(&self, level: ThreatLevel) -> Vec<NetworkEvent> {
        self.state
            .lock()
            .events
            .iter()
            .filter(|e| e.threat_level == level)
            .cloned()
            .collect()
    }

    /// Events with `from <= timestamp < to`
    pub fn events_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<NetworkEvent> {
        self.state
            .lock()
            .events
            .iter()
            .filter(|e| e.timestamp >= from && e.timestamp < to)
            .cloned()
            .collect()
    }

    /// The most recent `limit` events in original (chronological) order
    pub fn recent(&self, limit: usize) -> Vec<NetworkEvent> {
        let state = self.state.lock();
        let skip = state.events.len().saturating_sub(limit);
        state.events[skip..].to_vec()
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Pretty-printed JSON array of all events
    pub fn export_events_json(&self) -> serde_json::Result<String> {
        exporter::events_to_json(&self.events())
    }

    /// Pretty-printed JSON array of all anomalies
    pub fn export_anomalies_json(&self) -> serde_json::Result<String> {
        exporter::anomalies_to_json(&self.anomalies())
    }

    /// CSV rendering of all events
    pub fn export_events_csv(&self) -> String {
        exporter::events_to_csv(&self.events())
    }

    // ------------------------------------------------------------------
    // Persistence status
    // ------------------------------------------------------------------

    /// Most recent durable-write failure, if any
    pub fn last_persist_error(&self) -> Option<String> {
        self.persist.last_error()
    }

    /// Block until all scheduled writes have been processed
    pub fn flush(&self) {
        self.persist.flush();
    }
}

fn read_collection<T: serde::de::DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Vec<T> {
    let Some(bytes) = store.get(key) else {
        return Vec::new();
    };
    match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("Discarding malformed '{}' blob: {}", key, e);
            Vec::new()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

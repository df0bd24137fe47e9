//! Telemetry Module
//!
//! Event/anomaly records, the bounded event store, background persistence,
//! and export.
//!
//! ## Structure
//! - `event`: `NetworkEvent` + `LocationContext`
//! - `anomaly`: `NetworkAnomaly` + `AnomalyType`
//! - `store`: capacity- and age-bounded history
//! - `persist`: single-writer durable snapshot worker
//! - `exporter`: JSON / CSV rendering

pub mod anomaly;
pub mod event;
pub mod exporter;
pub mod persist;
pub mod store;

pub use anomaly::{AnomalyType, NetworkAnomaly};
pub use event::{LocationContext, NetworkEvent};
pub use store::{EventStore, StoreLimits};

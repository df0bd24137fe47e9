//! Logic Module - Engines & State
//!
//! ## Structure
//! - `threat/` - Threat levels, scoring rules, and the classification engine
//! - `monitor/` - Stateful monitor: dedup filter, anomaly detector, window
//! - `telemetry/` - Event/anomaly records, bounded store, persistence, export
//! - `baseline` - Expected network identity (externally settable)
//! - `sampler` - Raw radio sample input seam
//! - `storage` - Opaque key/value blob store seam
//! - `notify` - Notification dispatch seam

pub mod baseline;
pub mod monitor;
pub mod notify;
pub mod sampler;
pub mod storage;
pub mod telemetry;
pub mod threat;

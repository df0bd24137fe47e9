//! CellGuard Core - Cellular Network Threat Monitoring
//!
//! Samples the device's active radio technology, classifies each sample into
//! a scored [`NetworkEvent`](logic::telemetry::NetworkEvent), suppresses noise,
//! detects cross-event anomaly patterns, and manages a bounded, retention-
//! governed event history with best-effort durable persistence.
//!
//! The OS sampling mechanism, notification delivery, and UI are external
//! collaborators behind the [`logic::sampler::RadioSampler`],
//! [`logic::notify::Notifier`], and [`logic::storage::BlobStore`] seams.

pub mod constants;
pub mod logic;

//! Threat Module
//!
//! Scoring rules and the classification engine. This is where a raw radio
//! sample becomes a scored `NetworkEvent`.
//!
//! ## Structure
//! - `types`: `ThreatLevel` ordered enum
//! - `rules`: 2G set, suspicious-carrier tables, score weights, level map
//! - `classifier`: the pure classification function

pub mod classifier;
pub mod rules;
pub mod types;

// Re-export main items for convenience
pub use classifier::{classify, count_recent_transitions};
pub use types::ThreatLevel;

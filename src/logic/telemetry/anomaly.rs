//! Network Anomaly Types
//!
//! Cross-event anomaly records emitted by the detector. Immutable at
//! creation; "closing" an anomaly means constructing a replacement record
//! with `end_time` set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::threat::ThreatLevel;

use super::event::LocationContext;

// ============================================================================
// ANOMALY TYPE
// ============================================================================

/// Categories of detected network anomalies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyType {
    /// Technology flapping inside the detection window
    RapidTechnologyChange,
    /// 2G connection with an elevated threat level
    Suspicious2gConnection,
    /// Carrier the OS could not identify
    UnknownCarrier,
    /// Technology deviates from the device baseline
    UnusualSignalPattern,
    /// Forced drop to an older technology generation
    NetworkDowngrade,
    /// Carrier identity inconsistent with its codes
    CarrierSpoofing,
    /// Combined indicators consistent with a cell-site simulator
    ImsiCatcherSuspected,
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::RapidTechnologyChange => "rapid_technology_change",
            AnomalyType::Suspicious2gConnection => "suspicious_2g_connection",
            AnomalyType::UnknownCarrier => "unknown_carrier",
            AnomalyType::UnusualSignalPattern => "unusual_signal_pattern",
            AnomalyType::NetworkDowngrade => "network_downgrade",
            AnomalyType::CarrierSpoofing => "carrier_spoofing",
            AnomalyType::ImsiCatcherSuspected => "imsi_catcher_suspected",
        }
    }
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// NETWORK ANOMALY
// ============================================================================

/// A detected cross-event anomaly.
///
/// `related_events` holds event IDs as back-references, not ownership; the
/// referenced events live (and age out) in the event store independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAnomaly {
    pub id: String,
    pub start_time: DateTime<Utc>,
    /// Absent while the anomaly is considered active
    pub end_time: Option<DateTime<Utc>>,
    pub anomaly_type: AnomalyType,
    pub severity: ThreatLevel,
    pub description: String,
    pub related_events: Vec<String>,
    /// Detector confidence, clamped to [0, 1] at construction
    pub confidence: f64,
    pub location: Option<LocationContext>,
}

impl NetworkAnomaly {
    pub fn new(
        start_time: DateTime<Utc>,
        anomaly_type: AnomalyType,
        severity: ThreatLevel,
        description: &str,
        related_events: Vec<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time: None,
            anomaly_type,
            severity,
            description: description.to_string(),
            related_events,
            confidence: confidence.clamp(0.0, 1.0),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<LocationContext>) -> Self {
        self.location = location;
        self
    }

    /// Build the closed replacement for this anomaly.
    ///
    /// No detector path calls this today; anomalies stay active records.
    pub fn closed(&self, end_time: DateTime<Utc>) -> Self {
        Self {
            end_time: Some(end_time),
            ..self.clone()
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed time between start and end, when the anomaly was closed
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

// ============================================================================
// TESTS
// ============================================================================

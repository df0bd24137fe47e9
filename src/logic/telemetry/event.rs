//! Network Event Types
//!
//! Immutable, timestamped events for the monitoring history.
//! Events are append-only and never modified after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::threat::rules;
use crate::logic::threat::ThreatLevel;

// ============================================================================
// LOCATION CONTEXT
// ============================================================================

/// Device location captured alongside a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContext {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, when the OS reports one
    pub horizontal_accuracy_m: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

// ============================================================================
// NETWORK EVENT
// ============================================================================

/// One classified observation of the cellular connection.
///
/// Created once by the classification engine; only ever appended to the
/// window/store or evicted, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEvent {
    /// Unique event ID
    pub id: String,
    /// When the sample was classified (UTC)
    pub timestamp: DateTime<Utc>,
    /// OS-reported technology label, or absent when unreadable
    pub radio_technology: Option<String>,
    pub carrier_name: Option<String>,
    pub carrier_iso_country_code: Option<String>,
    pub mobile_country_code: Option<String>,
    pub mobile_network_code: Option<String>,
    pub threat_level: ThreatLevel,
    /// Human-readable summary of the observation
    pub description: String,
    pub location: Option<LocationContext>,
}

impl NetworkEvent {
    /// Create a new event at `timestamp` with a fresh ID
    pub fn new(timestamp: DateTime<Utc>, threat_level: ThreatLevel, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            radio_technology: None,
            carrier_name: None,
            carrier_iso_country_code: None,
            mobile_country_code: None,
            mobile_network_code: None,
            threat_level,
            description: description.to_string(),
            location: None,
        }
    }

    // Builder pattern methods
    pub fn with_technology(mut self, technology: Option<&str>) -> Self {
        self.radio_technology = technology.map(str::to_string);
        self
    }

    pub fn with_carrier(mut self, carrier_name: Option<&str>) -> Self {
        self.carrier_name = carrier_name.map(str::to_string);
        self
    }

    pub fn with_carrier_codes(
        mut self,
        iso: Option<&str>,
        mcc: Option<&str>,
        mnc: Option<&str>,
    ) -> Self {
        self.carrier_iso_country_code = iso.map(str::to_string);
        self.mobile_country_code = mcc.map(str::to_string);
        self.mobile_network_code = mnc.map(str::to_string);
        self
    }

    pub fn with_location(mut self, location: Option<LocationContext>) -> Self {
        self.location = location;
        self
    }

    /// Technology is in the 2G set
    pub fn is_2g(&self) -> bool {
        self.radio_technology
            .as_deref()
            .map(rules::is_2g_technology)
            .unwrap_or(false)
    }

    /// Carrier name is in one of the suspicious tables
    pub fn has_suspicious_carrier(&self) -> bool {
        self.carrier_name
            .as_deref()
            .map(rules::is_suspicious_carrier)
            .unwrap_or(false)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = NetworkEvent::new(Utc::now(), ThreatLevel::Medium, "Radio: GSM")
            .with_technology(Some("GSM"))
            .with_carrier(Some("Vodafone"))
            .with_carrier_codes(Some("de"), Some("262"), Some("02"));

        assert!(!event.id.is_empty());
        assert_eq!(event.radio_technology.as_deref(), Some("GSM"));
        assert_eq!(event.mobile_country_code.as_deref(), Some("262"));
        assert!(event.is_2g());
        assert!(!event.has_suspicious_carrier());
    }

    #[test]
    fn test_predicates_on_absent_fields() {
        let event = NetworkEvent::new(Utc::now(), ThreatLevel::None, "");
        assert!(!event.is_2g());
        assert!(!event.has_suspicious_carrier());
    }

    #[test]
    fn test_serde_round_trip_preserves_optionals() {
        let event = NetworkEvent::new(Utc::now(), ThreatLevel::High, "Radio: GSM | Threat: high")
            .with_technology(Some("GSM"))
            .with_location(Some(LocationContext {
                latitude: 52.52,
                longitude: 13.405,
                horizontal_accuracy_m: None,
                captured_at: Utc::now(),
            }));

        let json = serde_json::to_string(&event).unwrap();
        let back: NetworkEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(back.carrier_name.is_none());
    }
}

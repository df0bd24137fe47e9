//! Event Exporter
//!
//! Serializes event and anomaly collections for sharing: pretty-printed
//! JSON arrays (decode of an export equals the original collection) and a
//! CSV rendering for spreadsheet analysis.

use super::anomaly::NetworkAnomaly;
use super::event::NetworkEvent;

/// Pretty-printed JSON array with ISO-8601 timestamps
pub fn events_to_json(events: &[NetworkEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

/// Pretty-printed JSON array of anomalies, exported independently of events
pub fn anomalies_to_json(anomalies: &[NetworkAnomaly]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(anomalies)
}

const CSV_HEADER: &str =
    "Timestamp,ThreatLevel,Description,RadioTechnology,CarrierName,MCC,MNC,Is2G,SuspiciousCarrier";

/// CSV rendering of events. Boolean columns render as `Yes`/`No`; absent
/// optionals render as empty cells.
pub fn events_to_csv(events: &[NetworkEvent]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for event in events {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            event.timestamp.to_rfc3339(),
            event.threat_level,
            csv_quote(&event.description),
            csv_quote(event.radio_technology.as_deref().unwrap_or_default()),
            csv_quote(event.carrier_name.as_deref().unwrap_or_default()),
            csv_quote(event.mobile_country_code.as_deref().unwrap_or_default()),
            csv_quote(event.mobile_network_code.as_deref().unwrap_or_default()),
            yes_no(event.is_2g()),
            yes_no(event.has_suspicious_carrier()),
        ));
    }

    out
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn csv_quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Anomaly Detector
//!
//! Inspects the recent-event window and baseline state after an admitted
//! event and emits `NetworkAnomaly` records. Checks are independent: zero,
//! one, or several anomalies may fire per event. Anomalies are not
//! deduplicated across events.

use chrono::{DateTime, Utc};

use crate::logic::baseline::NetworkBaseline;
use crate::logic::telemetry::{AnomalyType, NetworkAnomaly, NetworkEvent};
use crate::logic::threat::{classifier, rules, ThreatLevel};

// Detector confidences per check
const RAPID_CHANGE_CONFIDENCE: f64 = 0.8;
const SUSPICIOUS_2G_CONFIDENCE: f64 = 0.7;
const BASELINE_MISMATCH_CONFIDENCE: f64 = 0.6;

/// Run all checks for an admitted event.
///
/// Invoked only for non-suppressed events, after the event has been pushed
/// into the window.
pub fn detect(
    event: &NetworkEvent,
    window: &[NetworkEvent],
    baseline: Option<&NetworkBaseline>,
    now: DateTime<Utc>,
    window_secs: i64,
) -> Vec<NetworkAnomaly> {
    let mut anomalies = Vec::new();

    if let Some(anomaly) = check_rapid_change(event, window, now, window_secs) {
        anomalies.push(anomaly);
    }
    if let Some(anomaly) = check_suspicious_2g(event, now) {
        anomalies.push(anomaly);
    }
    if let Some(anomaly) = check_baseline_mismatch(event, baseline, now) {
        anomalies.push(anomaly);
    }

    anomalies
}

/// Rapid technology change: >= 3 transitions inside the sliding window.
/// Related events are the last `RAPID_CHANGE_THRESHOLD` window entries.
fn check_rapid_change(
    event: &NetworkEvent,
    window: &[NetworkEvent],
    now: DateTime<Utc>,
    window_secs: i64,
) -> Option<NetworkAnomaly> {
    let transitions = classifier::count_recent_transitions(window, now, window_secs);
    if transitions < rules::RAPID_CHANGE_THRESHOLD {
        return None;
    }

    let related: Vec<String> = window
        .iter()
        .rev()
        .take(rules::RAPID_CHANGE_THRESHOLD as usize)
        .map(|e| e.id.clone())
        .collect();

    Some(
        NetworkAnomaly::new(
            now,
            AnomalyType::RapidTechnologyChange,
            ThreatLevel::Medium,
            &format!(
                "Radio technology changed {} times within the detection window",
                transitions
            ),
            related,
            RAPID_CHANGE_CONFIDENCE,
        )
        .with_location(event.location.clone()),
    )
}

/// Suspicious 2G: 2G technology at Medium or above. High severity when the
/// event itself is Critical.
fn check_suspicious_2g(event: &NetworkEvent, now: DateTime<Utc>) -> Option<NetworkAnomaly> {
    if !event.is_2g() || event.threat_level < ThreatLevel::Medium {
        return None;
    }

    let severity = if event.threat_level == ThreatLevel::Critical {
        ThreatLevel::High
    } else {
        ThreatLevel::Medium
    };

    Some(
        NetworkAnomaly::new(
            now,
            AnomalyType::Suspicious2gConnection,
            severity,
            &format!(
                "Device connected via 2G ({})",
                event.radio_technology.as_deref().unwrap_or_default()
            ),
            vec![event.id.clone()],
            SUSPICIOUS_2G_CONFIDENCE,
        )
        .with_location(event.location.clone()),
    )
}

/// Baseline mismatch: technology deviates from the expected one. Absence on
/// either side is a match, same semantics as the classifier.
fn check_baseline_mismatch(
    event: &NetworkEvent,
    baseline: Option<&NetworkBaseline>,
    now: DateTime<Utc>,
) -> Option<NetworkAnomaly> {
    let baseline = baseline?;
    if baseline.matches_technology(event.radio_technology.as_deref()) {
        return None;
    }

    Some(
        NetworkAnomaly::new(
            now,
            AnomalyType::UnusualSignalPattern,
            ThreatLevel::Low,
            &format!(
                "Technology {} deviates from expected {}",
                event.radio_technology.as_deref().unwrap_or_default(),
                baseline
                    .expected_radio_technology
                    .as_deref()
                    .unwrap_or_default()
            ),
            vec![event.id.clone()],
            BASELINE_MISMATCH_CONFIDENCE,
        )
        .with_location(event.location.clone()),
    )
}

// ============================================================================
// TESTS
// ============================================================================

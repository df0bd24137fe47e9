//! Threat Classifier
//!
//! Turns a raw radio sample into a scored `NetworkEvent`. Pure function of
//! its inputs: callers update the recent-event window before calling, and
//! `now` is explicit so the window cut-off is deterministic under test.

use chrono::{DateTime, Duration, Utc};

use crate::logic::baseline::NetworkBaseline;
use crate::logic::sampler::RadioSample;
use crate::logic::telemetry::NetworkEvent;

use super::rules;

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify one raw sample against the baseline and the recent-event window.
///
/// Additive integer scoring, then a step-function map to `ThreatLevel`
/// (see `rules::level_for_score`).
pub fn classify(
    sample: &RadioSample,
    baseline: Option<&NetworkBaseline>,
    recent: &[NetworkEvent],
    now: DateTime<Utc>,
    window_secs: i64,
) -> NetworkEvent {
    let mut score = 0u32;

    // 2G connection
    if sample
        .technology
        .as_deref()
        .map(rules::is_2g_technology)
        .unwrap_or(false)
    {
        score += rules::TWO_G_SCORE;
    }

    // Suspicious carrier name
    if let Some(carrier) = sample.carrier_name.as_deref() {
        score += rules::carrier_score(carrier);
    }

    // Technology flapping inside the detection window
    if count_recent_transitions(recent, now, window_secs) >= rules::RAPID_CHANGE_THRESHOLD {
        score += rules::RAPID_CHANGE_SCORE;
    }

    // Deviation from the device baseline (absence on either side is a match)
    if let Some(baseline) = baseline {
        if !baseline.matches_technology(sample.technology.as_deref()) {
            score += rules::BASELINE_MISMATCH_SCORE;
        }
    }

    let level = rules::level_for_score(score);

    NetworkEvent::new(now, level, &describe(sample, level))
        .with_technology(sample.technology.as_deref())
        .with_carrier(sample.carrier_name.as_deref())
        .with_carrier_codes(
            sample.carrier_iso_country_code.as_deref(),
            sample.mobile_country_code.as_deref(),
            sample.mobile_network_code.as_deref(),
        )
        .with_location(sample.location.clone())
}

/// Count technology transitions among window events no older than
/// `window_secs` before `now`.
///
/// A transition is an event whose technology differs from the immediately
/// preceding window event (chronological order); immediate repeats count
/// zero. Absent technologies compare by `Option` equality.
pub fn count_recent_transitions(
    recent: &[NetworkEvent],
    now: DateTime<Utc>,
    window_secs: i64,
) -> u32 {
    let cutoff = now - Duration::seconds(window_secs);
    let mut transitions = 0u32;
    let mut previous: Option<&Option<String>> = None;

    for event in recent.iter().filter(|e| e.timestamp >= cutoff) {
        if let Some(prev) = previous {
            if *prev != event.radio_technology {
                transitions += 1;
            }
        }
        previous = Some(&event.radio_technology);
    }

    transitions
}

/// Join present "Radio: X" / "Carrier: Y" / "Threat: Z" parts with " | ",
/// omitting absent fields rather than rendering them empty.
fn describe(sample: &RadioSample, level: crate::logic::threat::ThreatLevel) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(technology) = sample.technology.as_deref() {
        parts.push(format!("Radio: {}", technology));
    }
    if let Some(carrier) = sample.carrier_name.as_deref() {
        parts.push(format!("Carrier: {}", carrier));
    }
    parts.push(format!("Threat: {}", level));
    parts.join(" | ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::ThreatLevel;

    const WINDOW: i64 = 300;

    fn sample(tech: Option<&str>, carrier: Option<&str>) -> RadioSample {
        RadioSample::new(tech, carrier)
    }

    fn window_event(now: DateTime<Utc>, age_secs: i64, tech: Option<&str>) -> NetworkEvent {
        NetworkEvent::new(
            now - Duration::seconds(age_secs),
            ThreatLevel::None,
            "Threat: none",
        )
        .with_technology(tech)
    }

    /// Window that already shows >= 3 transitions within the cutoff
    fn flapping_window(now: DateTime<Utc>) -> Vec<NetworkEvent> {
        vec![
            window_event(now, 240, Some("LTE")),
            window_event(now, 180, Some("GSM")),
            window_event(now, 120, Some("LTE")),
            window_event(now, 60, Some("GSM")),
        ]
    }

    #[test]
    fn test_clean_sample_scores_none() {
        let event = classify(
            &sample(Some("LTE"), Some("Vodafone")),
            None,
            &[],
            Utc::now(),
            WINDOW,
        );
        assert_eq!(event.threat_level, ThreatLevel::None);
        assert_eq!(event.description, "Radio: LTE | Carrier: Vodafone | Threat: none");
    }

    #[test]
    fn test_score_boundary_grid() {
        // {2G on/off} x {carrier tier 0/4/5} x {rapid on/off} x {baseline mismatch on/off},
        // checked against the documented step map.
        let now = Utc::now();
        let baseline = NetworkBaseline::new(Some("5G"), None);
        let flapping = flapping_window(now);

        let cases: &[(Option<&str>, Option<&str>, bool, bool, ThreatLevel)] = &[
            // score 0 / 1
            (Some("LTE"), Some("Vodafone"), false, false, ThreatLevel::None),
            (Some("LTE"), Some("Vodafone"), false, true, ThreatLevel::Low),
            // score 2 / 3 collapse to Medium
            (Some("LTE"), Some("Vodafone"), true, false, ThreatLevel::Medium),
            (Some("LTE"), Some("Vodafone"), true, true, ThreatLevel::Medium),
            (Some("GSM"), Some("Vodafone"), false, false, ThreatLevel::Medium),
            // score 4
            (Some("GSM"), Some("Vodafone"), false, true, ThreatLevel::High),
            (Some("LTE"), Some("Unknown"), false, false, ThreatLevel::High),
            // score >= 5
            (Some("LTE"), Some("IMSI Catcher"), false, false, ThreatLevel::Critical),
            (Some("GSM"), Some("Vodafone"), true, false, ThreatLevel::Critical),
            (Some("GSM"), Some("Unknown"), false, false, ThreatLevel::Critical),
            (Some("GSM"), Some("IMSI Catcher"), true, true, ThreatLevel::Critical),
        ];

        for (tech, carrier, rapid, mismatch, expected) in cases {
            let window: &[NetworkEvent] = if *rapid { &flapping } else { &[] };
            // Baseline expects 5G; LTE and GSM both mismatch when enabled.
            let bl = if *mismatch { Some(&baseline) } else { None };
            let event = classify(&sample(*tech, *carrier), bl, window, now, WINDOW);
            assert_eq!(
                event.threat_level, *expected,
                "tech={:?} carrier={:?} rapid={} mismatch={}",
                tech, carrier, rapid, mismatch
            );
        }
    }

    #[test]
    fn test_absent_technology_omitted_from_description() {
        let event = classify(&sample(None, Some("Unknown")), None, &[], Utc::now(), WINDOW);
        assert_eq!(event.threat_level, ThreatLevel::High);
        assert_eq!(event.description, "Carrier: Unknown | Threat: high");
        assert!(event.radio_technology.is_none());
    }

    #[test]
    fn test_baseline_absence_is_a_match() {
        let baseline = NetworkBaseline::new(Some("LTE"), None);
        // Sample without a technology reading: no penalty
        let event = classify(&sample(None, None), Some(&baseline), &[], Utc::now(), WINDOW);
        assert_eq!(event.threat_level, ThreatLevel::None);

        // Baseline without an expectation: no penalty either
        let unset = NetworkBaseline::new(None, None);
        let event = classify(&sample(Some("GSM"), None), Some(&unset), &[], Utc::now(), WINDOW);
        assert_eq!(event.threat_level, ThreatLevel::Medium); // 2G only
    }

    #[test]
    fn test_transition_count_ignores_repeats_and_old_events() {
        let now = Utc::now();
        let window = vec![
            window_event(now, 600, Some("GSM")), // outside the 5-minute window
            window_event(now, 240, Some("LTE")),
            window_event(now, 180, Some("LTE")), // repeat, not a transition
            window_event(now, 120, Some("GSM")),
            window_event(now, 60, None), // absent still compares
        ];
        assert_eq!(count_recent_transitions(&window, now, WINDOW), 2);
        assert_eq!(count_recent_transitions(&flapping_window(now), now, WINDOW), 3);
        assert_eq!(count_recent_transitions(&[], now, WINDOW), 0);
    }
}

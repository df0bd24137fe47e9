//! Dedup Filter
//!
//! Decides whether a freshly classified event is noise relative to the last
//! admitted event. Suppressed events still update current state but reach
//! neither the window, the store, the detector, nor the notifier.

use crate::logic::telemetry::NetworkEvent;

/// Suppress `candidate` iff technology, carrier name, and threat level all
/// equal the last admitted event.
///
/// Two asymmetries are deliberate, matching the source behavior:
/// - the first event is always admitted;
/// - an absent `radio_technology` on either side is always treated as an
///   informative change, even absent-vs-absent.
pub fn should_suppress(candidate: &NetworkEvent, last_admitted: Option<&NetworkEvent>) -> bool {
    let Some(prior) = last_admitted else {
        return false;
    };

    let (Some(candidate_tech), Some(prior_tech)) = (
        candidate.radio_technology.as_deref(),
        prior.radio_technology.as_deref(),
    ) else {
        return false;
    };

    candidate_tech == prior_tech
        && candidate.carrier_name == prior.carrier_name
        && candidate.threat_level == prior.threat_level
}

// ============================================================================
// TESTS
// ============================================================================

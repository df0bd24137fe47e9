//! Network Baseline
//!
//! The device's expected normal network identity, used for deviation
//! scoring. Set externally (e.g. by the user confirming their home network);
//! the classification path only ever reads it. There is no in-engine
//! learning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::storage::{BlobStore, KEY_BASELINE};

// ============================================================================
// BASELINE RECORD
// ============================================================================

/// Singleton per-device baseline, persisted as its own blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkBaseline {
    pub expected_radio_technology: Option<String>,
    pub expected_carrier_name: Option<String>,
    pub expected_mobile_country_code: Option<String>,
    pub expected_mobile_network_code: Option<String>,
    pub established_at: DateTime<Utc>,
    pub sample_count: u64,
}

impl NetworkBaseline {
    pub fn new(
        expected_radio_technology: Option<&str>,
        expected_carrier_name: Option<&str>,
    ) -> Self {
        Self {
            expected_radio_technology: expected_radio_technology.map(str::to_string),
            expected_carrier_name: expected_carrier_name.map(str::to_string),
            expected_mobile_country_code: None,
            expected_mobile_network_code: None,
            established_at: Utc::now(),
            sample_count: 0,
        }
    }

    /// Compare a technology reading against the expected one.
    ///
    /// Absence on either side counts as a match: an unreadable sample or an
    /// unset expectation never scores as a deviation.
    pub fn matches_technology(&self, technology: Option<&str>) -> bool {
        match (technology, self.expected_radio_technology.as_deref()) {
            (Some(observed), Some(expected)) => observed == expected,
            _ => true,
        }
    }
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Load the baseline blob. Missing, cleared (`null`), or malformed blobs
/// yield `None`, the latter with a logged warning; a broken baseline never
/// aborts startup.
pub fn load_baseline(store: &dyn BlobStore) -> Option<NetworkBaseline> {
    let bytes = store.get(KEY_BASELINE)?;
    match serde_json::from_slice::<Option<NetworkBaseline>>(&bytes) {
        Ok(baseline) => baseline,
        Err(e) => {
            log::warn!("Discarding malformed baseline blob: {}", e);
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

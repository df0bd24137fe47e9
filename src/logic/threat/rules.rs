//! Threat Scoring Rules & Thresholds
//!
//! Defines the scoring tables for classification.
//! No classify logic here - only constants and the score-to-level map.

use super::types::ThreatLevel;

// ============================================================================
// TECHNOLOGY TABLES
// ============================================================================

/// OS technology labels considered 2G. 2G lacks mutual authentication and is
/// the classic downgrade target for cell-site simulators.
pub const RADIO_2G: [&str; 3] = ["GSM", "GPRS", "Edge"];

/// Exact match against the 2G label set
pub fn is_2g_technology(technology: &str) -> bool {
    RADIO_2G.contains(&technology)
}

// ============================================================================
// SUSPICIOUS CARRIER TABLES
// ============================================================================

/// Carrier names that indicate the OS could not identify the network
pub const UNKNOWN_CARRIERS: [&str; 3] = ["Unknown Carrier", "Unknown", "Unknown Network"];

/// Carrier names associated with rogue infrastructure
pub const ROGUE_CARRIERS: [&str; 3] = ["Rogue Base Station", "Fake Carrier", "IMSI Catcher"];

/// Score contribution of a carrier name: 0, [`UNKNOWN_CARRIER_SCORE`],
/// or [`ROGUE_CARRIER_SCORE`]
pub fn carrier_score(carrier_name: &str) -> u32 {
    if ROGUE_CARRIERS.contains(&carrier_name) {
        ROGUE_CARRIER_SCORE
    } else if UNKNOWN_CARRIERS.contains(&carrier_name) {
        UNKNOWN_CARRIER_SCORE
    } else {
        0
    }
}

/// True for any carrier name in either suspicious table
pub fn is_suspicious_carrier(carrier_name: &str) -> bool {
    carrier_score(carrier_name) > 0
}

// ============================================================================
// SCORE WEIGHTS (additive integer scoring)
// ============================================================================

/// Active technology is in the 2G set
pub const TWO_G_SCORE: u32 = 3;

/// Carrier name in the unknown table
pub const UNKNOWN_CARRIER_SCORE: u32 = 4;

/// Carrier name in the rogue table
pub const ROGUE_CARRIER_SCORE: u32 = 5;

/// Rapid technology flapping inside the detection window
pub const RAPID_CHANGE_SCORE: u32 = 2;

/// Technology differs from the device baseline
pub const BASELINE_MISMATCH_SCORE: u32 = 1;

/// Distinct technology transitions inside the window before the
/// rapid-change heuristic (and anomaly) fires
pub const RAPID_CHANGE_THRESHOLD: u32 = 3;

// ============================================================================
// SCORE -> LEVEL MAP
// ============================================================================

/// Map an additive score to a threat level.
///
/// Step function, not linear: 2 and 3 collapse to `Medium`.
pub fn level_for_score(score: u32) -> ThreatLevel {
    match score {
        0 => ThreatLevel::None,
        1 => ThreatLevel::Low,
        2 | 3 => ThreatLevel::Medium,
        4 => ThreatLevel::High,
        _ => ThreatLevel::Critical,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2g_set_is_exact_match() {
        assert!(is_2g_technology("GSM"));
        assert!(is_2g_technology("GPRS"));
        assert!(is_2g_technology("Edge"));
        assert!(!is_2g_technology("LTE"));
        assert!(!is_2g_technology("gsm")); // case-sensitive
        assert!(!is_2g_technology("EDGE"));
    }

    #[test]
    fn test_carrier_tiers() {
        assert_eq!(carrier_score("Unknown"), UNKNOWN_CARRIER_SCORE);
        assert_eq!(carrier_score("Unknown Carrier"), UNKNOWN_CARRIER_SCORE);
        assert_eq!(carrier_score("IMSI Catcher"), ROGUE_CARRIER_SCORE);
        assert_eq!(carrier_score("Rogue Base Station"), ROGUE_CARRIER_SCORE);
        assert_eq!(carrier_score("Vodafone"), 0);
    }

    #[test]
    fn test_level_map_boundaries() {
        assert_eq!(level_for_score(0), ThreatLevel::None);
        assert_eq!(level_for_score(1), ThreatLevel::Low);
        assert_eq!(level_for_score(2), ThreatLevel::Medium);
        assert_eq!(level_for_score(3), ThreatLevel::Medium);
        assert_eq!(level_for_score(4), ThreatLevel::High);
        assert_eq!(level_for_score(5), ThreatLevel::Critical);
        assert_eq!(level_for_score(14), ThreatLevel::Critical);
    }
}

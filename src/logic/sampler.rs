//! Radio Sample Input Seam
//!
//! The OS radio/carrier telemetry acquisition is an external collaborator;
//! this module defines the shape it delivers and a replay source for
//! deterministic offline runs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::telemetry::LocationContext;

// ============================================================================
// RAW SAMPLE
// ============================================================================

/// One raw observation of the active cellular connection.
///
/// Every field is optional: an absent technology or carrier is a valid,
/// first-class "unknown" reading, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadioSample {
    /// OS-reported radio access technology label (e.g. "LTE", "GSM")
    pub technology: Option<String>,
    /// Self-reported carrier display name
    pub carrier_name: Option<String>,
    /// ISO country code of the carrier
    pub carrier_iso_country_code: Option<String>,
    /// Mobile country code
    pub mobile_country_code: Option<String>,
    /// Mobile network code
    pub mobile_network_code: Option<String>,
    /// Device location at sample time, when available
    pub location: Option<LocationContext>,
}

impl RadioSample {
    pub fn new(technology: Option<&str>, carrier_name: Option<&str>) -> Self {
        Self {
            technology: technology.map(str::to_string),
            carrier_name: carrier_name.map(str::to_string),
            ..Default::default()
        }
    }
}

// ============================================================================
// SAMPLER SEAM
// ============================================================================

/// Source of raw radio samples for the monitor loop.
///
/// `None` means no sample is available this tick; the loop skips the check
/// without touching monitor state.
pub trait RadioSampler: Send {
    fn sample(&mut self) -> Option<RadioSample>;
}

/// Sampler that never produces a sample. Used when no telemetry source is
/// wired up (the service idles until one is).
pub struct NullSampler;

impl RadioSampler for NullSampler {
    fn sample(&mut self) -> Option<RadioSample> {
        None
    }
}

// ============================================================================
// JSONL REPLAY
// ============================================================================

/// Replays a recorded sample stream from a JSONL file, one sample per line.
///
/// Malformed lines are logged and skipped rather than aborting the replay.
pub struct ReplaySampler {
    lines: std::vec::IntoIter<String>,
}

impl ReplaySampler {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        log::info!("Replay mode: {} lines from {:?}", lines.len(), path);
        Ok(Self {
            lines: lines.into_iter(),
        })
    }
}

impl RadioSampler for ReplaySampler {
    fn sample(&mut self) -> Option<RadioSample> {
        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RadioSample>(&line) {
                Ok(sample) => return Some(sample),
                Err(e) => log::warn!("Skipping malformed replay line: {}", e),
            }
        }
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_replay_skips_malformed_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("samples.jsonl");
        let mut f = File::create(&path).unwrap();
        writeln!(f, r#"{{"technology":"LTE","carrier_name":"Vodafone"}}"#).unwrap();
        writeln!(f, "not json").unwrap();
        writeln!(f, r#"{{"technology":"GSM"}}"#).unwrap();

        let mut sampler = ReplaySampler::open(&path).unwrap();
        assert_eq!(sampler.sample().unwrap().technology.as_deref(), Some("LTE"));
        assert_eq!(sampler.sample().unwrap().technology.as_deref(), Some("GSM"));
        assert!(sampler.sample().is_none());
    }

    #[test]
    fn test_absent_fields_deserialize_as_none() {
        let sample: RadioSample = serde_json::from_str("{}").unwrap();
        assert!(sample.technology.is_none());
        assert!(sample.carrier_name.is_none());
    }
}

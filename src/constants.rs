//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden through a `CELLGUARD_*` environment
//! variable; unparsable values fall back to the default.

use std::path::PathBuf;

/// Maximum admitted events kept in the in-memory sliding window
pub const DEFAULT_MAX_RECENT_EVENTS: usize = 1000;

/// Maximum events kept in the persisted history
pub const DEFAULT_MAX_STORED_EVENTS: usize = 2000;

/// Maximum anomalies kept in the persisted history
pub const DEFAULT_MAX_STORED_ANOMALIES: usize = 1500;

/// Events older than this are evicted on the next append
pub const DEFAULT_EVENT_RETENTION_DAYS: i64 = 7;

/// Sliding window for rapid technology-change detection (seconds)
pub const DEFAULT_ANOMALY_WINDOW_SECS: i64 = 5 * 60;

/// Interval between radio samples in the service loop (seconds)
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "CellGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get the sliding-window capacity from environment or use default
pub fn get_max_recent_events() -> usize {
    env_usize("CELLGUARD_MAX_RECENT_EVENTS", DEFAULT_MAX_RECENT_EVENTS)
}

/// Get the stored-event cap from environment or use default
pub fn get_max_stored_events() -> usize {
    env_usize("CELLGUARD_MAX_STORED_EVENTS", DEFAULT_MAX_STORED_EVENTS)
}

/// Get the stored-anomaly cap from environment or use default
pub fn get_max_stored_anomalies() -> usize {
    env_usize("CELLGUARD_MAX_STORED_ANOMALIES", DEFAULT_MAX_STORED_ANOMALIES)
}

/// Get the retention window (days) from environment or use default
pub fn get_event_retention_days() -> i64 {
    env_i64("CELLGUARD_RETENTION_DAYS", DEFAULT_EVENT_RETENTION_DAYS)
}

/// Get the anomaly-detection window (seconds) from environment or use default
pub fn get_anomaly_window_secs() -> i64 {
    env_i64("CELLGUARD_ANOMALY_WINDOW_SECS", DEFAULT_ANOMALY_WINDOW_SECS)
}

/// Get the sample interval (seconds) from environment or use default
pub fn get_check_interval_secs() -> u64 {
    std::env::var("CELLGUARD_CHECK_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CHECK_INTERVAL_SECS)
}

/// Get the data directory from environment or the platform default
pub fn get_data_dir() -> PathBuf {
    std::env::var("CELLGUARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("cellguard")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env vars are not set under `cargo test`; defaults must come through.
        assert_eq!(get_max_recent_events(), DEFAULT_MAX_RECENT_EVENTS);
        assert_eq!(get_event_retention_days(), DEFAULT_EVENT_RETENTION_DAYS);
        assert_eq!(get_anomaly_window_secs(), DEFAULT_ANOMALY_WINDOW_SECS);
    }
}

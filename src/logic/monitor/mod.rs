//! Network Monitor
//!
//! Stateful engine driving one check per raw sample: classify, dedup,
//! window update, store append, anomaly detection, notification dispatch.
//! Single logical writer; the host loop never classifies samples in
//! parallel.
//!
//! ## Structure
//! - `dedup`: noise suppression against the last admitted event
//! - `detection`: cross-event anomaly checks

pub mod dedup;
pub mod detection;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logic::baseline::NetworkBaseline;
use crate::logic::notify::{self, Notifier};
use crate::logic::sampler::RadioSample;
use crate::logic::telemetry::{EventStore, NetworkEvent};
use crate::logic::threat::{classifier, ThreatLevel};

// ============================================================================
// CONFIG & STATUS
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Cap on the in-memory sliding window of admitted events
    pub max_recent_events: usize,
    /// Rapid-change detection window in seconds
    pub anomaly_window_secs: i64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_recent_events: crate::constants::get_max_recent_events(),
            anomaly_window_secs: crate::constants::get_anomaly_window_secs(),
        }
    }
}

/// Current classification state for a presentation layer to render
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub current_threat_level: ThreatLevel,
    pub current_event: Option<NetworkEvent>,
    pub is_monitoring: bool,
    pub last_check_time: Option<DateTime<Utc>>,
}

// ============================================================================
// MONITOR
// ============================================================================

/// Owns the baseline, the recent-event window, and the current state.
///
/// The window holds admitted events only and is distinct from the store's
/// longer-lived persisted history.
pub struct NetworkMonitor {
    config: MonitorConfig,
    baseline: Option<NetworkBaseline>,
    window: Vec<NetworkEvent>,
    current_threat_level: ThreatLevel,
    current_event: Option<NetworkEvent>,
    last_check_time: Option<DateTime<Utc>>,
    is_monitoring: bool,
    store: EventStore,
    notifier: Box<dyn Notifier>,
}

impl NetworkMonitor {
    pub fn new(store: EventStore, notifier: Box<dyn Notifier>, config: MonitorConfig) -> Self {
        Self {
            config,
            baseline: None,
            window: Vec::new(),
            current_threat_level: ThreatLevel::None,
            current_event: None,
            last_check_time: None,
            is_monitoring: false,
            store,
            notifier,
        }
    }

    /// Run one check against a raw sample. Returns whether the classified
    /// event was admitted (not suppressed as noise).
    pub fn check(&mut self, sample: &RadioSample) -> bool {
        self.check_at(sample, Utc::now())
    }

    /// `check` with an explicit clock, for deterministic tests
    pub fn check_at(&mut self, sample: &RadioSample, now: DateTime<Utc>) -> bool {
        let event = classifier::classify(
            sample,
            self.baseline.as_ref(),
            &self.window,
            now,
            self.config.anomaly_window_secs,
        );

        // Current state always updates, suppressed or not; no failure below
        // this point may prevent it.
        self.last_check_time = Some(now);
        self.current_threat_level = event.threat_level;
        self.current_event = Some(event.clone());

        if dedup::should_suppress(&event, self.window.last()) {
            log::debug!("Suppressed duplicate event: {}", event.description);
            return false;
        }

        self.window.push(event.clone());
        if self.window.len() > self.config.max_recent_events {
            let excess = self.window.len() - self.config.max_recent_events;
            self.window.drain(..excess);
        }

        self.store.append(event.clone());

        for anomaly in detection::detect(
            &event,
            &self.window,
            self.baseline.as_ref(),
            now,
            self.config.anomaly_window_secs,
        ) {
            log::warn!(
                "Anomaly detected: {} ({}, confidence {:.1})",
                anomaly.anomaly_type,
                anomaly.severity,
                anomaly.confidence
            );
            self.store.append_anomaly(anomaly);
        }

        if event.threat_level.requires_notification() {
            notify::dispatch(&*self.notifier, &event);
        }

        true
    }

    pub fn start(&mut self) {
        self.is_monitoring = true;
        log::info!("Network monitoring started");
    }

    pub fn stop(&mut self) {
        self.is_monitoring = false;
        log::info!("Network monitoring stopped");
    }

    pub fn is_monitoring(&self) -> bool {
        self.is_monitoring
    }

    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            current_threat_level: self.current_threat_level,
            current_event: self.current_event.clone(),
            is_monitoring: self.is_monitoring,
            last_check_time: self.last_check_time,
        }
    }

    /// Replace the device baseline and persist it. Passing `None` clears it.
    pub fn set_baseline(&mut self, baseline: Option<NetworkBaseline>) {
        self.store.persist_baseline(baseline.clone());
        self.baseline = baseline;
    }

    pub fn baseline(&self) -> Option<&NetworkBaseline> {
        self.baseline.as_ref()
    }

    /// History queries and export go straight to the store
    pub fn store(&self) -> &EventStore {
        &self.store
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::storage::MemoryBlobStore;
    use crate::logic::telemetry::{AnomalyType, StoreLimits};
    use chrono::Duration;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str, _identifier: &str) {
            self.sent.lock().push((title.to_string(), body.to_string()));
        }
    }

    fn monitor() -> (NetworkMonitor, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let store = EventStore::with_store(
            Box::new(MemoryBlobStore::new()),
            StoreLimits {
                max_events: 100,
                max_anomalies: 100,
                retention_days: 7,
            },
        );
        (
            NetworkMonitor::new(store, Box::new(notifier.clone()), MonitorConfig::default()),
            notifier,
        )
    }

    #[test]
    fn test_dedup_idempotence() {
        let (mut m, _) = monitor();
        let sample = RadioSample::new(Some("LTE"), Some("Vodafone"));
        let base = Utc::now();

        assert!(m.check_at(&sample, base));
        for i in 1..5 {
            assert!(!m.check_at(&sample, base + Duration::seconds(i)));
        }
        assert_eq!(m.store().event_count(), 1);
    }

    #[test]
    fn test_technology_change_readmission() {
        let (mut m, _) = monitor();
        let a = RadioSample::new(Some("LTE"), Some("Vodafone"));
        let b = RadioSample::new(Some("5G"), Some("Vodafone"));
        let base = Utc::now();

        m.check_at(&a, base);
        m.check_at(&a, base + Duration::seconds(1));
        m.check_at(&a, base + Duration::seconds(2));
        m.check_at(&b, base + Duration::seconds(3));

        let events = m.store().events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].radio_technology.as_deref(), Some("LTE"));
        assert_eq!(events[1].radio_technology.as_deref(), Some("5G"));
    }

    #[test]
    fn test_nil_technology_never_suppressed() {
        let (mut m, _) = monitor();
        let sample = RadioSample::new(None, Some("Vodafone"));
        let base = Utc::now();

        assert!(m.check_at(&sample, base));
        assert!(m.check_at(&sample, base + Duration::seconds(1)));
        assert_eq!(m.store().event_count(), 2);
    }

    #[test]
    fn test_suppressed_event_still_updates_current_state() {
        let (mut m, _) = monitor();
        let sample = RadioSample::new(Some("LTE"), Some("Vodafone"));
        let base = Utc::now();

        m.check_at(&sample, base);
        let later = base + Duration::seconds(30);
        assert!(!m.check_at(&sample, later));

        let status = m.status();
        assert_eq!(status.last_check_time, Some(later));
        assert_eq!(status.current_threat_level, ThreatLevel::None);
        assert!(status.current_event.is_some());
    }

    #[test]
    fn test_rapid_flapping_produces_anomaly() {
        let (mut m, _) = monitor();
        let base = Utc::now();
        let techs = ["LTE", "GSM", "LTE", "GSM"];
        for (i, tech) in techs.iter().enumerate() {
            m.check_at(
                &RadioSample::new(Some(tech), Some("Vodafone")),
                base + Duration::seconds(60 * i as i64),
            );
        }

        assert_eq!(m.store().event_count(), 4);
        let rapid: Vec<_> = m
            .store()
            .anomalies()
            .into_iter()
            .filter(|a| a.anomaly_type == AnomalyType::RapidTechnologyChange)
            .collect();
        assert!(!rapid.is_empty());
        assert_eq!(rapid[0].related_events.len(), 3);
    }

    #[test]
    fn test_notification_dispatch_threshold() {
        let (mut m, notifier) = monitor();
        let base = Utc::now();

        // ThreatLevel::None: no notification
        m.check_at(&RadioSample::new(Some("LTE"), Some("Vodafone")), base);
        assert!(notifier.sent.lock().is_empty());

        // 2G => Medium: notification with the event description as body
        m.check_at(
            &RadioSample::new(Some("GSM"), Some("Vodafone")),
            base + Duration::seconds(1),
        );
        let sent = notifier.sent.lock();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("Radio: GSM"));
    }

    #[test]
    fn test_baseline_mismatch_scoring_through_monitor() {
        let (mut m, _) = monitor();
        m.set_baseline(Some(NetworkBaseline::new(Some("LTE"), Some("Vodafone"))));

        m.check_at(&RadioSample::new(Some("5G"), Some("Vodafone")), Utc::now());
        // mismatch only: score 1 => Low
        assert_eq!(m.status().current_threat_level, ThreatLevel::Low);
        let anomalies = m.store().anomalies();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].anomaly_type, AnomalyType::UnusualSignalPattern);
    }

    #[test]
    fn test_window_is_capped() {
        let notifier = RecordingNotifier::default();
        let store = EventStore::with_store(
            Box::new(MemoryBlobStore::new()),
            StoreLimits {
                max_events: 1000,
                max_anomalies: 1000,
                retention_days: 7,
            },
        );
        let mut m = NetworkMonitor::new(
            store,
            Box::new(notifier),
            MonitorConfig {
                max_recent_events: 3,
                anomaly_window_secs: 300,
            },
        );

        let base = Utc::now();
        // Alternate carriers so nothing is suppressed
        for i in 0..6 {
            let carrier = if i % 2 == 0 { "A" } else { "B" };
            m.check_at(
                &RadioSample::new(Some("LTE"), Some(carrier)),
                base + Duration::seconds(i),
            );
        }

        assert_eq!(m.window.len(), 3);
        assert_eq!(m.store().event_count(), 6);
    }
}

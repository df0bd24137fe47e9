//! Notification Seam
//!
//! Notification delivery is an external collaborator. Any admitted event
//! whose level requires notification is forwarded here; the default
//! implementation just logs.

use crate::logic::telemetry::NetworkEvent;
use crate::logic::threat::ThreatLevel;

pub trait Notifier: Send {
    /// Forward a notification-worthy event: `{title, body, identifier}`
    fn notify(&self, title: &str, body: &str, identifier: &str);
}

/// Title per level tier; the body is always the event description
pub fn title_for(level: ThreatLevel) -> &'static str {
    if level.requires_immediate_alert() {
        "Possible surveillance activity"
    } else {
        "Network change detected"
    }
}

/// Dispatch an admitted event to the collaborator
pub fn dispatch(notifier: &dyn Notifier, event: &NetworkEvent) {
    notifier.notify(title_for(event.threat_level), &event.description, &event.id);
}

/// Default notifier: structured log only
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str, identifier: &str) {
        log::warn!("[NOTIFY] {}: {} (event {})", title, body, identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_tiers() {
        assert_eq!(title_for(ThreatLevel::Low), "Network change detected");
        assert_eq!(title_for(ThreatLevel::Medium), "Network change detected");
        assert_eq!(title_for(ThreatLevel::High), "Possible surveillance activity");
        assert_eq!(
            title_for(ThreatLevel::Critical),
            "Possible surveillance activity"
        );
    }
}

//! Threat Types
//!
//! Core types for threat classification. No logic - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Ordered threat level assigned to every classified network event.
///
/// Declaration order defines the total order: `None < Low < ... < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreatLevel {
    /// Nothing unusual about this sample
    None,
    /// Minor deviation, log only
    Low,
    /// Worth surfacing to the user
    Medium,
    /// Strong surveillance indicator
    High,
    /// Multiple strong indicators at once
    Critical,
}

impl ThreatLevel {
    /// Numeric priority: 0 (`None`) .. 4 (`Critical`)
    pub fn priority(&self) -> u8 {
        match self {
            ThreatLevel::None => 0,
            ThreatLevel::Low => 1,
            ThreatLevel::Medium => 2,
            ThreatLevel::High => 3,
            ThreatLevel::Critical => 4,
        }
    }

    /// High and Critical events warrant an immediate alert
    pub fn requires_immediate_alert(&self) -> bool {
        self.priority() >= 3
    }

    /// Anything above None is forwarded to the notification collaborator
    pub fn requires_notification(&self) -> bool {
        self.priority() >= 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::None => "none",
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ThreatLevel::None => "#10b981",     // Green
            ThreatLevel::Low => "#84cc16",      // Lime
            ThreatLevel::Medium => "#f59e0b",   // Yellow
            ThreatLevel::High => "#f97316",     // Orange
            ThreatLevel::Critical => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================

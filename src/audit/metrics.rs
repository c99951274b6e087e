//! Security percentages derived from the pass counters.

use super::Counters;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Confidentiality, authenticity and integrity percentages.
///
/// Each value is `None` when nothing was measured for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// Share of protected endpoints that answered an anonymous caller
    pub confidentiality_leak: Option<f64>,
    /// Share of anonymous attempts on protected endpoints that were rejected
    pub authenticity: Option<f64>,
    /// Share of integrity-sensitive mutations that were not rejected
    pub integrity_failure_rate: Option<f64>,
}

impl SecurityMetrics {
    /// Compute percentages from counters, rounded to 2 decimals.
    #[must_use]
    pub fn from_counters(c: &Counters) -> Self {
        Self {
            confidentiality_leak: percentage(c.protected_failed, c.protected),
            authenticity: percentage(c.auth_success, c.auth_attempts),
            integrity_failure_rate: percentage(c.integrity_failed, c.integrity_checks),
        }
    }

    /// Authenticity as a behavior metric in [0, 1].
    #[must_use]
    pub fn auth_score(&self) -> Option<f64> {
        self.authenticity.map(|pct| pct / 100.0)
    }

    /// Integrity as a behavior metric in [0, 1].
    #[must_use]
    pub fn integrity_score(&self) -> Option<f64> {
        self.integrity_failure_rate.map(|pct| (100.0 - pct) / 100.0)
    }

    /// Whether no metric could be computed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.confidentiality_leak.is_none()
            && self.authenticity.is_none()
            && self.integrity_failure_rate.is_none()
    }
}

fn percentage(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(round_to(
        f64::from(numerator) / f64::from(denominator) * 100.0,
        2,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counters_are_undefined() {
        let m = SecurityMetrics::from_counters(&Counters::default());
        assert_eq!(m, SecurityMetrics::default());
        assert!(m.is_empty());
        assert!(m.auth_score().is_none());
        assert!(m.integrity_score().is_none());
    }

    #[test]
    fn test_percentages() {
        let c = Counters {
            protected: 3,
            protected_failed: 1,
            auth_attempts: 3,
            auth_success: 2,
            integrity_checks: 2,
            integrity_failed: 0,
        };
        let m = SecurityMetrics::from_counters(&c);
        assert_eq!(m.confidentiality_leak, Some(33.33));
        assert_eq!(m.authenticity, Some(66.67));
        assert_eq!(m.integrity_failure_rate, Some(0.0));
        assert_eq!(m.integrity_score(), Some(1.0));
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        let c = Counters {
            protected: 32,
            protected_failed: 1,
            auth_attempts: 8,
            auth_success: 7,
            ..Counters::default()
        };
        let m = SecurityMetrics::from_counters(&c);
        assert_eq!(m.confidentiality_leak, Some(3.12));
        assert_eq!(m.authenticity, Some(87.5));
    }

    #[test]
    fn test_behavior_scores() {
        let m = SecurityMetrics {
            confidentiality_leak: Some(0.0),
            authenticity: Some(100.0),
            integrity_failure_rate: Some(50.0),
        };
        assert_eq!(m.auth_score(), Some(1.0));
        assert_eq!(m.integrity_score(), Some(0.5));
    }

    #[test]
    fn test_partial_metrics() {
        let c = Counters {
            integrity_checks: 1,
            integrity_failed: 1,
            ..Counters::default()
        };
        let m = SecurityMetrics::from_counters(&c);
        assert!(m.authenticity.is_none());
        assert_eq!(m.integrity_failure_rate, Some(100.0));
        assert!(!m.is_empty());
    }
}

//! API quality index: maturity-weighted sum of behavior metrics.

use super::{Dimension, MaturityLevel, SecurityPosture, WeightRow};
use crate::audit::SecurityMetrics;
use crate::utils::round_to;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default success rate used when none is supplied.
pub const DEFAULT_SUCCESS: f64 = 0.85;
/// Default responsibility score used when none is supplied.
pub const DEFAULT_RESPONSIBILITY: f64 = 0.75;

/// Behavior metrics that cannot be measured by anonymous probing and are
/// supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorInputs {
    /// Functional success rate in [0, 1]
    pub success: f64,
    /// Responsibility score in [0, 1]
    pub responsibility: f64,
}

impl Default for BehaviorInputs {
    fn default() -> Self {
        Self {
            success: DEFAULT_SUCCESS,
            responsibility: DEFAULT_RESPONSIBILITY,
        }
    }
}

/// Behavior metrics in [0, 1]. Missing values contribute nothing to the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorMetrics {
    pub auth: Option<f64>,
    pub integrity: Option<f64>,
    pub success: Option<f64>,
    pub responsibility: Option<f64>,
}

impl BehaviorMetrics {
    /// Combine measured security metrics with supplied inputs.
    #[must_use]
    pub fn from_security(metrics: &SecurityMetrics, inputs: &BehaviorInputs) -> Self {
        Self {
            auth: metrics.auth_score(),
            integrity: metrics.integrity_score(),
            success: Some(inputs.success),
            responsibility: Some(inputs.responsibility),
        }
    }

    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Auth => self.auth,
            Dimension::Integrity => self.integrity,
            Dimension::Success => self.success,
            Dimension::Responsibility => self.responsibility,
        }
    }

    /// Dimensions without a value.
    #[must_use]
    pub fn missing(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.get(*d).is_none())
            .collect()
    }
}

/// Quality index result with everything that went into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIndexReport {
    pub maturity: MaturityLevel,
    pub posture: SecurityPosture,
    pub weights: WeightRow,
    pub behavior: BehaviorMetrics,
    /// Weighted sum, rounded to 4 decimals
    pub api_qi: f64,
}

/// Computes the API quality index for a posture.
#[derive(Debug, Clone, Default)]
pub struct QualityIndexScorer {
    posture: SecurityPosture,
}

impl QualityIndexScorer {
    #[must_use]
    pub const fn new(posture: SecurityPosture) -> Self {
        Self { posture }
    }

    #[must_use]
    pub const fn maturity(&self) -> MaturityLevel {
        MaturityLevel::from_posture(&self.posture)
    }

    /// Score behavior metrics against this posture's weight row.
    #[must_use]
    pub fn score(&self, behavior: BehaviorMetrics) -> QualityIndexReport {
        let maturity = self.maturity();
        let weights = WeightRow::for_level(maturity);
        let missing = behavior.missing();
        if !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(Dimension::name).collect();
            tracing::debug!("No value for {}; contributing 0", names.join(", "));
        }
        QualityIndexReport {
            maturity,
            posture: self.posture,
            weights,
            behavior,
            api_qi: weighted_sum(&behavior, &weights),
        }
    }

    /// Score measured security metrics together with supplied inputs.
    #[must_use]
    pub fn score_audit(
        &self,
        metrics: &SecurityMetrics,
        inputs: &BehaviorInputs,
    ) -> QualityIndexReport {
        self.score(BehaviorMetrics::from_security(metrics, inputs))
    }
}

/// Σ metric × weight over all dimensions, rounded to 4 decimals.
#[must_use]
pub fn weighted_sum(behavior: &BehaviorMetrics, weights: &WeightRow) -> f64 {
    let total: f64 = Dimension::ALL
        .iter()
        .filter_map(|d| behavior.get(*d).map(|value| value * weights.get(*d)))
        .sum();
    round_to(total, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(auth: f64, integrity: f64, success: f64, responsibility: f64) -> BehaviorMetrics {
        BehaviorMetrics {
            auth: Some(auth),
            integrity: Some(integrity),
            success: Some(success),
            responsibility: Some(responsibility),
        }
    }

    #[test]
    fn test_identity_managed_reference_score() {
        let scorer = QualityIndexScorer::new(SecurityPosture::new(true, true, true));
        let report = scorer.score(full(0.9, 0.95, 0.85, 0.75));
        assert_eq!(report.maturity, MaturityLevel::IdentityManaged);
        assert_eq!(report.api_qi, 0.8436);
    }

    #[test]
    fn test_missing_dimension_contributes_zero() {
        let scorer = QualityIndexScorer::new(SecurityPosture::new(false, false, false));
        let behavior = BehaviorMetrics {
            auth: None,
            ..full(0.0, 1.0, 1.0, 1.0)
        };
        // 0.25 + 0.25 + 0.125
        assert_eq!(scorer.score(behavior).api_qi, 0.625);
        assert_eq!(behavior.missing(), vec![Dimension::Auth]);
    }

    #[test]
    fn test_perfect_behavior_scores_row_sum() {
        for level in MaturityLevel::all() {
            let weights = WeightRow::for_level(*level);
            let qi = weighted_sum(&full(1.0, 1.0, 1.0, 1.0), &weights);
            assert!((qi - 1.0).abs() <= 0.0011, "{level}: {qi}");
        }
    }

    #[test]
    fn test_score_audit_uses_inputs() {
        let metrics = SecurityMetrics {
            confidentiality_leak: Some(0.0),
            authenticity: Some(100.0),
            integrity_failure_rate: Some(0.0),
        };
        let report = QualityIndexScorer::default().score_audit(&metrics, &BehaviorInputs::default());
        assert_eq!(report.behavior.success, Some(DEFAULT_SUCCESS));
        assert_eq!(report.behavior.responsibility, Some(DEFAULT_RESPONSIBILITY));
        assert_eq!(report.behavior.auth, Some(1.0));
        // Authenticated: 0.333 + 0.222 + 0.222 * 0.85 + 0.222 * 0.75
        assert_eq!(report.api_qi, 0.9102);
    }

    #[test]
    fn test_empty_audit_scores_only_inputs() {
        let report = QualityIndexScorer::default()
            .score_audit(&SecurityMetrics::default(), &BehaviorInputs::default());
        assert!(report.behavior.auth.is_none());
        assert!(report.behavior.integrity.is_none());
        // 0.222 * 0.85 + 0.222 * 0.75
        assert_eq!(report.api_qi, 0.3552);
    }
}

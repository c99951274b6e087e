//! Maturity-dependent weights over the behavior dimensions.

use super::MaturityLevel;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative importance of a dimension at a given maturity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTier {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl WeightTier {
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Behavior dimension scored by the quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Auth,
    Integrity,
    Success,
    Responsibility,
}

impl Dimension {
    /// Dimensions in weight-row order.
    pub const ALL: [Self; 4] = [
        Self::Auth,
        Self::Integrity,
        Self::Success,
        Self::Responsibility,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Integrity => "integrity",
            Self::Success => "success",
            Self::Responsibility => "responsibility",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized weights for one maturity level. Sums to 1.0 within rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRow {
    pub auth: f64,
    pub integrity: f64,
    pub success: f64,
    pub responsibility: f64,
}

impl WeightRow {
    /// Normalize a tier row by its sum, rounding each weight to 3 decimals.
    #[must_use]
    pub fn from_tiers(tiers: [WeightTier; 4]) -> Self {
        let total = f64::from(tiers.iter().map(|t| t.value()).sum::<u32>());
        let w = tiers.map(|t| round_to(f64::from(t.value()) / total, 3));
        Self {
            auth: w[0],
            integrity: w[1],
            success: w[2],
            responsibility: w[3],
        }
    }

    /// Weight row for a maturity level.
    #[must_use]
    pub fn for_level(level: MaturityLevel) -> Self {
        Self::from_tiers(level.tiers())
    }

    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> f64 {
        self.as_array()[dimension.index()]
    }

    /// Weights in [`Dimension::ALL`] order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.auth, self.integrity, self.success, self.responsibility]
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

//! Security maturity levels.

use super::WeightTier;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared security posture of the audited service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SecurityPosture {
    /// Callers must authenticate
    pub auth_required: bool,
    /// Access is authorized per resource or role
    pub access_control: bool,
    /// Identities are managed centrally
    pub iam: bool,
}

impl Default for SecurityPosture {
    fn default() -> Self {
        Self {
            auth_required: true,
            access_control: false,
            iam: false,
        }
    }
}

impl SecurityPosture {
    #[must_use]
    pub const fn new(auth_required: bool, access_control: bool, iam: bool) -> Self {
        Self {
            auth_required,
            access_control,
            iam,
        }
    }
}

/// Four-step maturity ladder, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MaturityLevel {
    /// No authentication required
    Open,
    /// Authentication but no access control
    Authenticated,
    /// Access control without central identity management
    AccessControlled,
    /// Access control backed by identity management
    IdentityManaged,
}

impl MaturityLevel {
    /// Tiers over (auth, integrity, success, responsibility) per level.
    const OPEN_TIERS: [WeightTier; 4] = [
        WeightTier::High,
        WeightTier::Medium,
        WeightTier::Medium,
        WeightTier::Low,
    ];
    const AUTHENTICATED_TIERS: [WeightTier; 4] = [
        WeightTier::High,
        WeightTier::Medium,
        WeightTier::Medium,
        WeightTier::Medium,
    ];
    const ACCESS_CONTROLLED_TIERS: [WeightTier; 4] = [
        WeightTier::Medium,
        WeightTier::Medium,
        WeightTier::High,
        WeightTier::Medium,
    ];
    const IDENTITY_MANAGED_TIERS: [WeightTier; 4] = [
        WeightTier::Low,
        WeightTier::Medium,
        WeightTier::High,
        WeightTier::High,
    ];

    /// Derive the level from a posture. First matching rung wins.
    #[must_use]
    pub const fn from_posture(posture: &SecurityPosture) -> Self {
        if !posture.auth_required {
            Self::Open
        } else if !posture.access_control {
            Self::Authenticated
        } else if !posture.iam {
            Self::AccessControlled
        } else {
            Self::IdentityManaged
        }
    }

    /// All levels in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Open,
            Self::Authenticated,
            Self::AccessControlled,
            Self::IdentityManaged,
        ]
    }

    /// Numeric level, 0 through 3.
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Authenticated => 1,
            Self::AccessControlled => 2,
            Self::IdentityManaged => 3,
        }
    }

    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Open),
            1 => Some(Self::Authenticated),
            2 => Some(Self::AccessControlled),
            3 => Some(Self::IdentityManaged),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Authenticated => "Authenticated",
            Self::AccessControlled => "Access controlled",
            Self::IdentityManaged => "Identity managed",
        }
    }

    /// Weight tiers for (auth, integrity, success, responsibility).
    #[must_use]
    pub const fn tiers(&self) -> [WeightTier; 4] {
        match self {
            Self::Open => Self::OPEN_TIERS,
            Self::Authenticated => Self::AUTHENTICATED_TIERS,
            Self::AccessControlled => Self::ACCESS_CONTROLLED_TIERS,
            Self::IdentityManaged => Self::IDENTITY_MANAGED_TIERS,
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.level(), self.name())
    }
}

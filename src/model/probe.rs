//! Probe, expectation and verdict types.

use super::HttpMethod;
use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome an anonymous request to an endpoint is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Public endpoint: expect 200
    PublicSuccess,
    /// Protected endpoint: expect 401 or 403
    Protected,
    /// Protected creation on the collection root: 401, 403 or 201 are all
    /// tolerated as expected codes, though a 201 is still reported as a failure
    ProtectedOrCreated,
}

impl Expectation {
    /// Whether this expectation counts towards the protected/auth counters.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::Protected | Self::ProtectedOrCreated)
    }

    /// Expected status codes, as shown in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PublicSuccess => "200",
            Self::Protected => "401/403",
            Self::ProtectedOrCreated => "401/403/201",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One anonymous request to issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// Contract path template, e.g. `/api/v1/books/{book_id}`
    pub path: String,
    pub method: HttpMethod,
    /// Concrete URL with placeholders substituted
    pub url: String,
}

/// Result of executing one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The round trip completed with this status code
    Status(u16),
    /// The request never produced a status code
    Failed(TransportError),
}

impl ProbeOutcome {
    /// Status code, if the round trip completed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Failed(_) => None,
        }
    }

    /// Whether the status is an authentication/authorization rejection.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Status(401 | 403))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "{code}"),
            Self::Failed(err) => f.write_str(err.label()),
        }
    }
}

impl From<Result<u16, TransportError>> for ProbeOutcome {
    fn from(result: Result<u16, TransportError>) -> Self {
        match result {
            Ok(code) => Self::Status(code),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Per-probe verdict shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Error,
}

impl Verdict {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the report needs about one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub probe: Probe,
    pub expectation: Expectation,
    pub outcome: ProbeOutcome,
    pub verdict: Verdict,
    /// Counted as an integrity-sensitive mutation
    pub integrity_checked: bool,
    /// Anonymous creation succeeded on a protected collection
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unauthenticated_create: bool,
}

impl ProbeRecord {
    /// Human-readable finding for failed or errored probes.
    #[must_use]
    pub fn finding(&self) -> Option<String> {
        match (&self.verdict, &self.outcome) {
            (Verdict::Pass, _) => None,
            (Verdict::Error, ProbeOutcome::Failed(err)) => Some(format!(
                "{} {} could not be probed: {err}",
                self.probe.method, self.probe.path
            )),
            (_, outcome) if self.unauthenticated_create => Some(format!(
                "{} {} created a resource without credentials ({outcome})",
                self.probe.method, self.probe.path
            )),
            (_, outcome) if self.expectation.is_protected() => Some(format!(
                "{} {} declares 401/403 but answered {outcome} to an anonymous request",
                self.probe.method, self.probe.path
            )),
            (_, outcome) => Some(format!(
                "{} {} expected 200 but answered {outcome}",
                self.probe.method, self.probe.path
            )),
        }
    }
}

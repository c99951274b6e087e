//! Outcome aggregation: verdicts and security counters.

use crate::model::{Expectation, Probe, ProbeOutcome, ProbeRecord, Verdict};
use serde::{Deserialize, Serialize};

/// Security counters accumulated over one audit pass. Monotonic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Probes against endpoints that declare 401/403
    pub protected: u32,
    /// Protected probes that were not rejected
    pub protected_failed: u32,
    /// Anonymous attempts on protected endpoints
    pub auth_attempts: u32,
    /// Attempts rejected with 401/403
    pub auth_success: u32,
    /// Integrity-sensitive mutations probed
    pub integrity_checks: u32,
    /// Integrity-sensitive mutations that were not rejected
    pub integrity_failed: u32,
}

/// Folds probe outcomes into verdicts and [`Counters`].
///
/// The only writer of the counters; owned by the pass that drives it.
#[derive(Debug, Default)]
pub struct Aggregator {
    counters: Counters,
    errors: u32,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe outcome and return its report row.
    pub fn record(
        &mut self,
        probe: Probe,
        expectation: Expectation,
        outcome: ProbeOutcome,
        integrity_sensitive: bool,
    ) -> ProbeRecord {
        let Some(status) = outcome.status() else {
            self.errors += 1;
            return ProbeRecord {
                probe,
                expectation,
                outcome,
                verdict: Verdict::Error,
                integrity_checked: false,
                unauthenticated_create: false,
            };
        };

        let rejected = outcome.is_rejection();
        let mut unauthenticated_create = false;

        let verdict = match expectation {
            Expectation::PublicSuccess => {
                if status == 200 {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                }
            }
            Expectation::Protected | Expectation::ProtectedOrCreated => {
                self.counters.protected += 1;
                self.counters.auth_attempts += 1;
                if rejected {
                    self.counters.auth_success += 1;
                    Verdict::Pass
                } else {
                    self.counters.protected_failed += 1;
                    unauthenticated_create =
                        expectation == Expectation::ProtectedOrCreated && status == 201;
                    Verdict::Fail
                }
            }
        };

        if integrity_sensitive {
            self.counters.integrity_checks += 1;
            if !rejected {
                self.counters.integrity_failed += 1;
            }
        }

        ProbeRecord {
            probe,
            expectation,
            outcome,
            verdict,
            integrity_checked: integrity_sensitive,
            unauthenticated_create,
        }
    }

    /// Counters so far.
    #[must_use]
    pub const fn counters(&self) -> Counters {
        self.counters
    }

    /// Probes that ended in a transport error.
    #[must_use]
    pub const fn errors(&self) -> u32 {
        self.errors
    }

    /// Consume the aggregator and return the final counters.
    #[must_use]
    pub const fn finish(self) -> Counters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::model::HttpMethod;

    fn probe(path: &str, method: HttpMethod) -> Probe {
        Probe {
            path: path.into(),
            method,
            url: format!("http://localhost:8000{path}"),
        }
    }

    #[test]
    fn test_public_endpoint_verdicts() {
        let mut agg = Aggregator::new();
        let ok = agg.record(
            probe("/items", HttpMethod::Get),
            Expectation::PublicSuccess,
            ProbeOutcome::Status(200),
            false,
        );
        assert_eq!(ok.verdict, Verdict::Pass);

        let not_found = agg.record(
            probe("/items/{id}", HttpMethod::Get),
            Expectation::PublicSuccess,
            ProbeOutcome::Status(404),
            false,
        );
        assert_eq!(not_found.verdict, Verdict::Fail);
        // Public probes never touch the security counters
        assert_eq!(agg.counters(), Counters::default());
    }

    #[test]
    fn test_rejected_protected_probe() {
        let mut agg = Aggregator::new();
        let rec = agg.record(
            probe("/items", HttpMethod::Post),
            Expectation::Protected,
            ProbeOutcome::Status(403),
            false,
        );
        assert_eq!(rec.verdict, Verdict::Pass);
        let c = agg.finish();
        assert_eq!(c.protected, 1);
        assert_eq!(c.protected_failed, 0);
        assert_eq!(c.auth_attempts, 1);
        assert_eq!(c.auth_success, 1);
    }

    #[test]
    fn test_leaking_protected_probe() {
        let mut agg = Aggregator::new();
        let rec = agg.record(
            probe("/admin", HttpMethod::Get),
            Expectation::Protected,
            ProbeOutcome::Status(200),
            false,
        );
        assert_eq!(rec.verdict, Verdict::Fail);
        assert!(!rec.unauthenticated_create);
        let c = agg.finish();
        assert_eq!((c.protected, c.protected_failed, c.auth_success), (1, 1, 0));
    }

    #[test]
    fn test_created_on_protected_collection_is_a_failure() {
        let mut agg = Aggregator::new();
        let rec = agg.record(
            probe("/api/v1/books", HttpMethod::Post),
            Expectation::ProtectedOrCreated,
            ProbeOutcome::Status(201),
            true,
        );
        assert_eq!(rec.verdict, Verdict::Fail);
        assert!(rec.unauthenticated_create);
        assert!(rec.integrity_checked);
        let c = agg.finish();
        assert_eq!(c.protected_failed, 1);
        assert_eq!(c.auth_success, 0);
        assert_eq!((c.integrity_checks, c.integrity_failed), (1, 1));
    }

    #[test]
    fn test_integrity_counts_independent_of_expectation() {
        let mut agg = Aggregator::new();
        // Public DELETE on the item path answering 204 still breaks integrity
        agg.record(
            probe("/api/v1/books/{book_id}", HttpMethod::Delete),
            Expectation::PublicSuccess,
            ProbeOutcome::Status(204),
            true,
        );
        agg.record(
            probe("/api/v1/books", HttpMethod::Post),
            Expectation::ProtectedOrCreated,
            ProbeOutcome::Status(401),
            true,
        );
        let c = agg.finish();
        assert_eq!(c.integrity_checks, 2);
        assert_eq!(c.integrity_failed, 1);
    }

    #[test]
    fn test_transport_error_touches_nothing() {
        let mut agg = Aggregator::new();
        let rec = agg.record(
            probe("/api/v1/books", HttpMethod::Post),
            Expectation::ProtectedOrCreated,
            ProbeOutcome::Failed(TransportError::Timeout),
            true,
        );
        assert_eq!(rec.verdict, Verdict::Error);
        assert!(!rec.integrity_checked);
        assert_eq!(agg.errors(), 1);
        assert_eq!(agg.finish(), Counters::default());
    }
}

//! Audit pass driver.

use super::{resolve_url, Aggregator, AuditRules, Counters, ProbeTransport};
use crate::model::{Contract, Expectation, Probe, ProbeOutcome, ProbeRecord, Verdict};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A probe with its classification, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedProbe {
    pub probe: Probe,
    pub expectation: Expectation,
    pub integrity_sensitive: bool,
    /// Response codes the contract declares for this endpoint
    pub declared: Vec<String>,
}

/// Result of one complete audit pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRun {
    /// One record per declared endpoint, in contract order
    pub records: Vec<ProbeRecord>,
    pub counters: Counters,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    pub started_at: DateTime<Utc>,
}

impl AuditRun {
    /// Number of records with the given verdict.
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.records.iter().filter(|r| r.verdict == verdict).count()
    }

    /// Records that did not pass.
    pub fn findings(&self) -> impl Iterator<Item = &ProbeRecord> {
        self.records.iter().filter(|r| r.verdict != Verdict::Pass)
    }
}

/// Drives classification, probing and aggregation over a contract.
pub struct AuditEngine {
    transport: Box<dyn ProbeTransport>,
    rules: AuditRules,
    base_url: String,
    concurrency: usize,
}

impl AuditEngine {
    /// Create an engine probing `base_url` through `transport`.
    pub fn new(transport: Box<dyn ProbeTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            rules: AuditRules::default(),
            base_url: base_url.into(),
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: AuditRules) -> Self {
        self.rules = rules;
        self
    }

    /// Number of probes in flight at once. `0` and `1` both mean sequential.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &AuditRules {
        &self.rules
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport, e.g. for the readiness wait.
    #[must_use]
    pub fn transport(&self) -> &dyn ProbeTransport {
        self.transport.as_ref()
    }

    /// Classify every endpoint without sending anything.
    #[must_use]
    pub fn plan(&self, contract: &Contract) -> Vec<PlannedProbe> {
        contract
            .endpoints()
            .map(|endpoint| PlannedProbe {
                probe: Probe {
                    path: endpoint.path.to_string(),
                    method: endpoint.method,
                    url: resolve_url(&self.base_url, endpoint.path, &self.rules),
                },
                expectation: self.rules.classify(endpoint.path, endpoint.method, endpoint.meta),
                integrity_sensitive: self
                    .rules
                    .is_integrity_sensitive(endpoint.path, endpoint.method),
                declared: endpoint.meta.responses.iter().cloned().collect(),
            })
            .collect()
    }

    /// Probe every endpoint exactly once and aggregate the outcomes.
    ///
    /// Never fails: transport problems become `error` verdicts.
    pub fn run(&self, contract: &Contract) -> AuditRun {
        let started_at = Utc::now();
        let start = Instant::now();
        let plan = self.plan(contract);

        tracing::info!(
            "Probing {} endpoints of {} at {} via {}",
            plan.len(),
            contract.display_name(),
            self.base_url,
            self.transport.name()
        );

        let outcomes = self.execute(&plan);

        let mut aggregator = Aggregator::new();
        let records: Vec<ProbeRecord> = plan
            .into_iter()
            .zip(outcomes)
            .map(|(planned, outcome)| {
                if let ProbeOutcome::Failed(err) = &outcome {
                    tracing::warn!("{} {}: {err}", planned.probe.method, planned.probe.url);
                } else {
                    tracing::debug!(
                        "{} {} -> {outcome} (expected {})",
                        planned.probe.method,
                        planned.probe.url,
                        planned.expectation
                    );
                }
                aggregator.record(
                    planned.probe,
                    planned.expectation,
                    outcome,
                    planned.integrity_sensitive,
                )
            })
            .collect();

        if aggregator.errors() > 0 {
            tracing::warn!("{} probe(s) could not reach the target", aggregator.errors());
        }

        let run = AuditRun {
            records,
            counters: aggregator.finish(),
            duration: start.elapsed(),
            started_at,
        };
        tracing::info!(
            "Audit finished in {:?}: {} passed, {} failed, {} errors",
            run.duration,
            run.count(Verdict::Pass),
            run.count(Verdict::Fail),
            run.count(Verdict::Error)
        );
        run
    }

    /// Send all probes, returning outcomes in plan order.
    fn execute(&self, plan: &[PlannedProbe]) -> Vec<ProbeOutcome> {
        let send = |planned: &PlannedProbe| -> ProbeOutcome {
            self.transport
                .send(planned.probe.method, &planned.probe.url)
                .into()
        };

        if self.concurrency <= 1 || plan.len() <= 1 {
            return plan.iter().map(send).collect();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .build()
        {
            Ok(pool) => pool.install(|| plan.par_iter().map(send).collect()),
            Err(e) => {
                tracing::warn!("Failed to start probe pool ({e}), probing sequentially");
                plan.iter().map(send).collect()
            }
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

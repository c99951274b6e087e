//! Anonymous access-control audit.
//!
//! An audit pass classifies every endpoint a [`Contract`](crate::model::Contract)
//! declares, sends exactly one credential-free request per endpoint through a
//! [`ProbeTransport`], and folds the status codes into verdicts and
//! [`Counters`]. [`SecurityMetrics`] turns the counters into percentages.
//!
//! ```no_run
//! use api_qi::audit::{AuditEngine, HttpTransport, SecurityMetrics, DEFAULT_TIMEOUT};
//! use api_qi::parse_contract;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let contract = parse_contract(Path::new("openapi.yaml"))?;
//! let engine = AuditEngine::new(
//!     Box::new(HttpTransport::new(DEFAULT_TIMEOUT)?),
//!     "http://localhost:8000",
//! );
//! let run = engine.run(&contract);
//! let metrics = SecurityMetrics::from_counters(&run.counters);
//! println!("authenticity: {:?}", metrics.authenticity);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod classify;
mod engine;
mod metrics;
mod probe;
mod readiness;

pub use aggregate::{Aggregator, Counters};
pub use classify::AuditRules;
pub use engine::{AuditEngine, AuditRun, PlannedProbe};
pub use metrics::SecurityMetrics;
pub use probe::{resolve_url, HttpTransport, ProbeTransport, DEFAULT_TIMEOUT};
pub use readiness::{wait_for_ready, ReadinessCheck};

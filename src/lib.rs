//! **Anonymous access-control auditing for HTTP APIs.**
//!
//! `api-qi` reads an OpenAPI contract, sends one credential-free request to
//! every declared endpoint, and checks whether endpoints that declare 401/403
//! actually turn anonymous callers away. The results are summarized as three
//! security percentages and combined with supplied success and responsibility
//! scores into a maturity-weighted API quality index (API-QI).
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`Contract`] (path → method → declared responses) and the
//!   per-probe records an audit produces.
//! - **[`parsers`]**: Loads OpenAPI 3.x / Swagger 2.0 documents, YAML or JSON.
//! - **[`audit`]**: Classification, probing through a [`ProbeTransport`], the
//!   readiness wait, aggregation into [`Counters`] and [`SecurityMetrics`].
//! - **[`scoring`]**: Maturity levels, the weight matrix and the API-QI.
//! - **[`reports`]**: Table, summary, JSON, CSV and SARIF output.
//! - **[`pipeline`]**: Stage functions tying the above together for the CLI.
//!
//! ## Getting Started
//!
//! ```no_run
//! use api_qi::audit::{AuditEngine, HttpTransport, SecurityMetrics, DEFAULT_TIMEOUT};
//! use api_qi::scoring::{BehaviorInputs, QualityIndexScorer, SecurityPosture};
//! use api_qi::parse_contract;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let contract = parse_contract(Path::new("openapi.yaml"))?;
//!     let engine = AuditEngine::new(
//!         Box::new(HttpTransport::new(DEFAULT_TIMEOUT)?),
//!         "http://localhost:8000",
//!     );
//!     let run = engine.run(&contract);
//!
//!     let metrics = SecurityMetrics::from_counters(&run.counters);
//!     let quality = QualityIndexScorer::new(SecurityPosture::new(true, true, true))
//!         .score_audit(&metrics, &BehaviorInputs::default());
//!
//!     println!("confidentiality leak: {:?}", metrics.confidentiality_leak);
//!     println!("API-QI at level {}: {:.4}", quality.maturity, quality.api_qi);
//!     Ok(())
//! }
//! ```
//!
//! Scoring alone needs no network access:
//!
//! ```
//! use api_qi::scoring::{BehaviorMetrics, QualityIndexScorer, SecurityPosture};
//!
//! let behavior = BehaviorMetrics {
//!     auth: Some(0.9),
//!     integrity: Some(0.95),
//!     success: Some(0.85),
//!     responsibility: Some(0.75),
//! };
//! let report = QualityIndexScorer::new(SecurityPosture::new(true, true, true)).score(behavior);
//! assert_eq!(report.api_qi, 0.8436);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Counter and percentage math casts between u32/usize and f64
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config and posture structs legitimately use several bools
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod utils;

// Re-export main types for convenience
pub use audit::{
    AuditEngine, AuditRules, AuditRun, Counters, HttpTransport, ProbeTransport, SecurityMetrics,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, OutputConfig, Validatable};
pub use error::{AuditError, ErrorContext, Result, TransportError};
pub use model::{Contract, Expectation, HttpMethod, ProbeOutcome, ProbeRecord, Verdict};
pub use parsers::{parse_contract, parse_contract_str};
pub use reports::{AuditReport, ReportFormat, ReportGenerator};
pub use scoring::{MaturityLevel, QualityIndexReport, QualityIndexScorer, SecurityPosture};

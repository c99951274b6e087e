//! Pipeline orchestration for audit runs.
//!
//! Shared orchestration for the load → wait → probe → score → report
//! workflow, so CLI command handlers stay thin.

mod audit_stage;
mod output;
mod parse;
mod report_stage;

pub use audit_stage::run_audit;
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_contract_with_context, ParsedContract};
pub use report_stage::output_report;

use crate::error::AuditError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The configuration failed validation
    #[error("Invalid configuration: {}", .errors.join("; "))]
    InvalidConfig { errors: Vec<String> },

    /// The target never answered the readiness probe
    #[error("Target not ready at {url}")]
    TargetNotReady {
        url: String,
        #[source]
        source: AuditError,
    },
}

impl PipelineError {
    /// Exit code this failure maps to.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::TargetNotReady { .. } => exit_codes::TARGET_NOT_READY,
            Self::InvalidConfig { .. } => exit_codes::ERROR,
        }
    }
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Audit completed (findings do not change the exit code)
    pub const SUCCESS: i32 = 0;
    /// API-QI fell below `--min-score`
    pub const SCORE_BELOW_THRESHOLD: i32 = 1;
    /// The target never became ready; nothing was probed
    pub const TARGET_NOT_READY: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

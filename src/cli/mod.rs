//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod audit;
mod plan;
mod score;

pub use audit::{run_audit, run_audit_with_transport, AuditCommand};
pub use plan::run_plan;
pub use score::{run_matrix, run_score, ScoreCommand};

//! Report generation for audit results.
//!
//! This module provides multiple output formats:
//! - Table: per-probe terminal table plus the metric block
//! - Summary: compact metrics and findings
//! - JSON: structured data for programmatic integration
//! - CSV: one row per probe for spreadsheet import
//! - SARIF: CI/CD security dashboard integration

mod csv;
mod json;
mod sarif;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use sarif::SarifReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{
    format_percent, AuditReport, ContractSummary, ReportFormat, ReportMetadata, VerdictSummary,
};

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render an audit report
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(&self, report: &AuditReport, writer: &mut dyn Write) -> Result<(), ReportError> {
        let rendered = self.generate(report)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Sarif => Box::new(SarifReporter::new()),
    }
}

//! CSV report generator.
//!
//! One row per probe, suitable for spreadsheet import and data analysis
//! pipelines.

use super::{AuditReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::ProbeRecord;
use std::fmt::Write as _;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Method,Path,URL,Expected,Actual,Verdict,Integrity,Finding\n");

        for record in &report.run.records {
            write_probe_line(&mut content, record)?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_probe_line(content: &mut String, record: &ProbeRecord) -> std::fmt::Result {
    writeln!(
        content,
        "{},\"{}\",\"{}\",{},{},{},{},\"{}\"",
        record.probe.method,
        escape_csv(&record.probe.path),
        escape_csv(&record.probe.url),
        record.expectation.label(),
        record.outcome,
        record.verdict,
        if record.integrity_checked { "yes" } else { "no" },
        escape_csv(&record.finding().unwrap_or_default())
    )
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

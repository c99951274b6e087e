//! JSON report generator.

use super::{AuditReport, ReportError, ReportFormat, ReportGenerator};

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::sample_report;
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_report_structure() {
        let output = JsonReporter::new().generate(&sample_report()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["metadata"]["tool"], "api-qi");
        assert!(json["metadata"]["generated_at"].is_string());
        assert_eq!(json["contract"]["endpoints"], 4);
        assert_eq!(json["contract"]["protected"], 2);
        assert_eq!(json["summary"]["errors"], 1);
        assert_eq!(json["run"]["records"].as_array().unwrap().len(), 4);
        assert_eq!(json["metrics"]["authenticity"], 50.0);
        assert_eq!(json["quality"]["maturity"], "authenticated");
        assert!(json["quality"]["api_qi"].is_number());
    }

    #[test]
    fn test_json_records_carry_outcomes() {
        let output = JsonReporter::new().pretty(false).generate(&sample_report()).unwrap();
        assert!(!output.contains('\n'));
        let json: Value = serde_json::from_str(&output).unwrap();
        let records = json["run"]["records"].as_array().unwrap();

        assert_eq!(records[1]["outcome"]["status"], 201);
        assert_eq!(records[1]["verdict"], "fail");
        assert_eq!(records[1]["unauthenticated_create"], true);
        assert_eq!(records[2]["outcome"]["failed"]["kind"], "timeout");
        assert_eq!(records[2]["verdict"], "error");
        // Only flagged records carry the creation marker
        assert!(records[0].get("unauthenticated_create").is_none());
    }

    #[test]
    fn test_undefined_metric_is_null() {
        let mut report = sample_report();
        report.metrics.integrity_failure_rate = None;
        let json: Value =
            serde_json::from_str(&JsonReporter::new().generate(&report).unwrap()).unwrap();
        assert!(json["metrics"]["integrity_failure_rate"].is_null());
    }
}

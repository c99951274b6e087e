//! Report output stage.

use super::{should_use_color, write_output, OutputTarget};
use crate::config::OutputConfig;
use crate::reports::{create_reporter_with_options, AuditReport};
use anyhow::Result;

/// Render the report in the configured format and write it out.
pub fn output_report(output: &OutputConfig, report: &AuditReport, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    // Escape codes never go to files
    let use_color = should_use_color(output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(output.format, use_color);
    let rendered = reporter.generate(report)?;
    write_output(&rendered, &target, quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_report;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_output_report_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audit.csv");
        let output = OutputConfig {
            format: ReportFormat::Csv,
            file: Some(path.clone()),
            no_color: false,
        };
        output_report(&output, &sample_report(), true).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Method,Path"));
    }

    #[test]
    fn test_table_written_to_file_has_no_color() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audit.txt");
        let output = OutputConfig {
            format: ReportFormat::Table,
            file: Some(path.clone()),
            no_color: false,
        };
        output_report(&output, &sample_report(), true).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains('\x1b'));
    }
}

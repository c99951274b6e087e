//! Terminal reporters: per-probe table and compact summary.

use super::{format_percent, AuditReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::{ProbeRecord, Verdict};
use crate::scoring::Dimension;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Pad to a display width. Padding happens before coloring so escape codes
/// never count towards the column.
fn pad(text: &str, width: usize) -> String {
    let shown = truncate(text, width);
    let fill = width.saturating_sub(UnicodeWidthStr::width(shown.as_str()));
    format!("{shown}{}", " ".repeat(fill))
}

fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

const fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "green",
        Verdict::Fail => "red",
        Verdict::Error => "yellow",
    }
}

/// Lines shared by both terminal reporters: findings, metrics and the index.
fn metric_block(report: &AuditReport, color: &dyn Fn(&str, &str) -> String) -> Vec<String> {
    let mut lines = Vec::new();
    let quality = &report.quality;

    let findings: Vec<&ProbeRecord> = report.run.findings().collect();
    if !findings.is_empty() {
        lines.push(color("Findings:", "bold"));
        for record in findings {
            if let Some(text) = record.finding() {
                let marker = if record.verdict == Verdict::Error { "?" } else { "!" };
                lines.push(format!(
                    "  {} {text}",
                    color(marker, verdict_color(record.verdict))
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(color("Security metrics:", "bold"));
    lines.push(format!(
        "  {} {:>8}",
        color(&pad("Confidentiality leak", 22), "cyan"),
        format_percent(report.metrics.confidentiality_leak)
    ));
    lines.push(format!(
        "  {} {:>8}",
        color(&pad("Authenticity", 22), "cyan"),
        format_percent(report.metrics.authenticity)
    ));
    lines.push(format!(
        "  {} {:>8}",
        color(&pad("Integrity failure rate", 22), "cyan"),
        format_percent(report.metrics.integrity_failure_rate)
    ));
    lines.push(String::new());

    lines.push(format!(
        "{} {}",
        color("Maturity level:", "bold"),
        quality.maturity
    ));
    let weights: Vec<String> = Dimension::ALL
        .iter()
        .map(|d| format!("{d} {:.3}", quality.weights.get(*d)))
        .collect();
    lines.push(format!("{} {}", color("Weights:", "bold"), weights.join(" | ")));

    let qi = format!("{:.4}", quality.api_qi);
    let qi_color = if quality.api_qi >= 0.8 {
        "green"
    } else if quality.api_qi >= 0.5 {
        "yellow"
    } else {
        "red"
    };
    lines.push(format!("{} {}", color("API-QI:", "bold"), color(&qi, qi_color)));
    lines
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("API Access-Control Audit", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Contract:", "cyan"),
            report.contract.name
        ));
        lines.push(format!(
            "{}    {}",
            self.color("Target:", "cyan"),
            report.metadata.base_url
        ));
        let s = &report.summary;
        lines.push(format!(
            "{}    {} probes: {} passed, {} failed, {} errors",
            self.color("Probes:", "cyan"),
            s.total,
            self.color(&s.passed.to_string(), "green"),
            self.color(&s.failed.to_string(), if s.failed > 0 { "red" } else { "green" }),
            self.color(&s.errors.to_string(), if s.errors > 0 { "yellow" } else { "green" }),
        ));
        lines.push(String::new());

        lines.extend(metric_block(report, &|t, c| self.color(t, c)));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter: one row per probe, then the metric block
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

const METHOD_W: usize = 8;
const PATH_W: usize = 40;
const EXPECTED_W: usize = 12;
const ACTUAL_W: usize = 9;

impl ReportGenerator for TableReporter {
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {} {} {} {}",
            self.color(&pad("METHOD", METHOD_W), "bold"),
            self.color(&pad("PATH", PATH_W), "bold"),
            self.color(&pad("EXPECTED", EXPECTED_W), "bold"),
            self.color(&pad("ACTUAL", ACTUAL_W), "bold"),
            self.color("VERDICT", "bold"),
        ));
        lines.push("─".repeat(METHOD_W + PATH_W + EXPECTED_W + ACTUAL_W + 11));

        for record in &report.run.records {
            let verdict = record.verdict.name().to_uppercase();
            lines.push(format!(
                "{} {} {} {} {}",
                pad(record.probe.method.as_str(), METHOD_W),
                pad(&record.probe.path, PATH_W),
                pad(record.expectation.label(), EXPECTED_W),
                pad(&record.outcome.to_string(), ACTUAL_W),
                self.color(&verdict, verdict_color(record.verdict)),
            ));
        }

        lines.push(String::new());
        let s = &report.summary;
        lines.push(format!(
            "Total: {} probes | {} passed | {} failed | {} errors | {}",
            s.total, s.passed, s.failed, s.errors, report.contract.name
        ));
        lines.push(String::new());

        lines.extend(metric_block(report, &|t, c| self.color(t, c)));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

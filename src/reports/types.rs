//! Report type definitions.

use crate::audit::{AuditRun, SecurityMetrics};
use crate::model::{Contract, Verdict};
use crate::scoring::QualityIndexReport;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Per-probe table followed by the metric block (colored)
    #[default]
    Table,
    /// Metrics and findings only
    Summary,
    /// Structured JSON output
    Json,
    /// One row per probe, for spreadsheets
    Csv,
    /// SARIF 2.1.0 for CI/CD
    Sarif,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Sarif => write!(f, "sarif"),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Tool name
    pub tool: String,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Audited base URL
    pub base_url: String,
    /// Contract file, when read from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_path: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            base_url: base_url.into(),
            contract_path: None,
        }
    }

    #[must_use]
    pub fn with_contract_path(mut self, path: impl Into<String>) -> Self {
        self.contract_path = Some(path.into());
        self
    }
}

/// What the report says about the contract itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub endpoints: usize,
    /// Endpoints declaring 401/403
    pub protected: usize,
}

impl From<&Contract> for ContractSummary {
    fn from(contract: &Contract) -> Self {
        Self {
            name: contract.display_name(),
            title: contract.title.clone(),
            version: contract.version.clone(),
            endpoints: contract.endpoint_count(),
            protected: contract.protected_count(),
        }
    }
}

/// Verdict tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl From<&AuditRun> for VerdictSummary {
    fn from(run: &AuditRun) -> Self {
        Self {
            total: run.records.len(),
            passed: run.count(Verdict::Pass),
            failed: run.count(Verdict::Fail),
            errors: run.count(Verdict::Error),
        }
    }
}

/// Everything a reporter renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub metadata: ReportMetadata,
    pub contract: ContractSummary,
    pub summary: VerdictSummary,
    pub run: AuditRun,
    pub metrics: SecurityMetrics,
    pub quality: QualityIndexReport,
}

impl AuditReport {
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        contract: &Contract,
        run: AuditRun,
        quality: QualityIndexReport,
    ) -> Self {
        let metrics = SecurityMetrics::from_counters(&run.counters);
        Self {
            metadata,
            contract: ContractSummary::from(contract),
            summary: VerdictSummary::from(&run),
            run,
            metrics,
            quality,
        }
    }
}

/// Render an optional percentage, `n/a` when undefined.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"))
}

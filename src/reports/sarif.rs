//! SARIF 2.1.0 report generator for CI/CD integration.

use super::{AuditReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::{ProbeRecord, Verdict};
use serde::Serialize;

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";

/// SARIF report generator
pub struct SarifReporter {
    /// Include probes that could not be sent
    include_errors: bool,
}

impl SarifReporter {
    /// Create a new SARIF reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_errors: true,
        }
    }

    /// Set whether to include transport errors as notes
    #[must_use]
    pub const fn include_errors(mut self, include: bool) -> Self {
        self.include_errors = include;
        self
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SarifReporter {
    fn generate(&self, report: &AuditReport) -> Result<String, ReportError> {
        let location = report
            .metadata
            .contract_path
            .as_ref()
            .map(|uri| SarifLocation {
                physical_location: Some(SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: uri.clone() },
                }),
            });

        let results: Vec<SarifResult> = report
            .run
            .findings()
            .filter(|r| self.include_errors || r.verdict != Verdict::Error)
            .filter_map(|record| {
                let (rule_id, level) = classify_finding(record);
                Some(SarifResult {
                    rule_id: rule_id.to_string(),
                    level,
                    message: SarifMessage {
                        text: record.finding()?,
                    },
                    locations: location.iter().cloned().collect(),
                })
            })
            .collect();

        let sarif = SarifReport {
            schema: SARIF_SCHEMA.to_string(),
            version: "2.1.0".to_string(),
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: report.metadata.tool.clone(),
                        version: report.metadata.tool_version.clone(),
                        information_uri: "https://owasp.org/API-Security/".to_string(),
                        rules: get_sarif_rules(),
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&sarif)?)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Sarif
    }
}

fn classify_finding(record: &ProbeRecord) -> (&'static str, SarifLevel) {
    if record.verdict == Verdict::Error {
        ("API-QI-004", SarifLevel::Note)
    } else if record.unauthenticated_create {
        ("API-QI-002", SarifLevel::Error)
    } else if record.expectation.is_protected() {
        ("API-QI-001", SarifLevel::Error)
    } else if record.integrity_checked {
        ("API-QI-003", SarifLevel::Error)
    } else {
        ("API-QI-005", SarifLevel::Warning)
    }
}

fn get_sarif_rules() -> Vec<SarifRule> {
    [
        (
            "API-QI-001",
            "ProtectedEndpointExposed",
            "An endpoint declaring 401/403 answered an anonymous request",
            SarifLevel::Error,
        ),
        (
            "API-QI-002",
            "UnauthenticatedCreate",
            "A protected collection accepted an anonymous creation",
            SarifLevel::Error,
        ),
        (
            "API-QI-003",
            "IntegrityViolation",
            "An anonymous mutation was not rejected",
            SarifLevel::Error,
        ),
        (
            "API-QI-004",
            "ProbeError",
            "The endpoint could not be probed",
            SarifLevel::Note,
        ),
        (
            "API-QI-005",
            "UnexpectedStatus",
            "A public endpoint did not answer 200",
            SarifLevel::Warning,
        ),
    ]
    .into_iter()
    .map(|(id, name, description, level)| SarifRule {
        id: id.to_string(),
        name: name.to_string(),
        short_description: SarifMessage {
            text: description.to_string(),
        },
        default_configuration: SarifConfiguration { level },
    })
    .collect()
}

// ============================================================================
// SARIF data structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    information_uri: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    name: String,
    short_description: SarifMessage,
    default_configuration: SarifConfiguration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifConfiguration {
    level: SarifLevel,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: SarifLevel,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: Option<SarifPhysicalLocation>,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum SarifLevel {
    Error,
    Warning,
    Note,
}

#[cfg(test)]
mod tests {
    use super::super::test_support::sample_report;
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_sarif_envelope() {
        let output = SarifReporter::new().generate(&sample_report()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["version"], "2.1.0");
        assert_eq!(json["$schema"], SARIF_SCHEMA);
        assert_eq!(json["runs"][0]["tool"]["driver"]["name"], "api-qi");
        assert_eq!(
            json["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap().len(),
            5
        );
    }

    #[test]
    fn test_sarif_results_per_finding() {
        let output = SarifReporter::new().generate(&sample_report()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        let results = json["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ruleId"], "API-QI-002");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "openapi.yaml"
        );
        assert_eq!(results[1]["ruleId"], "API-QI-004");
        assert_eq!(results[1]["level"], "note");
    }

    #[test]
    fn test_sarif_without_errors() {
        let output = SarifReporter::new()
            .include_errors(false)
            .generate(&sample_report())
            .unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["runs"][0]["results"].as_array().unwrap().len(), 1);
    }
}

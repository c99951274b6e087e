//! Score and matrix command handlers.
//!
//! `score` computes the API-QI from supplied metrics without probing anything;
//! `matrix` prints the weight row of every maturity level.

use crate::pipeline::{write_output, OutputTarget};
use crate::reports::ReportFormat;
use crate::scoring::{
    BehaviorMetrics, Dimension, MaturityLevel, QualityIndexReport, QualityIndexScorer,
    SecurityPosture, WeightRow,
};
use anyhow::{bail, Result};
use serde_json::json;
use std::path::PathBuf;

/// Score command configuration
pub struct ScoreCommand {
    pub posture: SecurityPosture,
    pub behavior: BehaviorMetrics,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the score command.
pub fn run_score(command: ScoreCommand) -> Result<()> {
    for dimension in Dimension::ALL {
        if let Some(value) = command.behavior.get(dimension) {
            if !(0.0..=1.0).contains(&value) {
                bail!("{dimension} must be between 0.0 and 1.0, got {value}");
            }
        }
    }

    let report = QualityIndexScorer::new(command.posture).score(command.behavior);
    let output_text = match command.output {
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        _ => format_score(&report),
    };
    write_output(
        &output_text,
        &OutputTarget::from_option(command.output_file),
        false,
    )
}

fn format_score(report: &QualityIndexReport) -> String {
    let mut lines = vec![format!("Maturity level: {}", report.maturity), String::new()];
    for dimension in Dimension::ALL {
        let value = report
            .behavior
            .get(dimension)
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"));
        lines.push(format!(
            "  {:<15} {:>6}  x {:.3}",
            dimension.name(),
            value,
            report.weights.get(dimension)
        ));
    }
    lines.push(String::new());
    lines.push(format!("API-QI: {:.4}", report.api_qi));
    lines.join("\n")
}

/// Run the matrix command.
pub fn run_matrix(output: ReportFormat, output_file: Option<PathBuf>) -> Result<()> {
    let output_text = match output {
        ReportFormat::Json => format_matrix_json()?,
        _ => format_matrix_table(),
    };
    write_output(&output_text, &OutputTarget::from_option(output_file), false)
}

fn format_matrix_json() -> Result<String> {
    let levels: Vec<_> = MaturityLevel::all()
        .iter()
        .map(|level| {
            json!({
                "level": level.level(),
                "name": level.name(),
                "tiers": level.tiers(),
                "weights": WeightRow::for_level(*level),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&levels)?)
}

fn format_matrix_table() -> String {
    let mut header = format!("{:<22}", "LEVEL");
    for dimension in Dimension::ALL {
        header.push_str(&format!(" {:>15}", dimension.name()));
    }
    let mut lines = vec![header];
    for level in MaturityLevel::all() {
        let weights = WeightRow::for_level(*level);
        let mut line = format!("{:<22}", level.to_string());
        for (dimension, tier) in Dimension::ALL.iter().zip(level.tiers()) {
            let cell = format!("{:.3} ({})", weights.get(*dimension), tier.name());
            line.push_str(&format!(" {cell:>15}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(values: [f64; 4]) -> BehaviorMetrics {
        BehaviorMetrics {
            auth: Some(values[0]),
            integrity: Some(values[1]),
            success: Some(values[2]),
            responsibility: Some(values[3]),
        }
    }

    #[test]
    fn test_score_rejects_out_of_range() {
        let err = run_score(ScoreCommand {
            posture: SecurityPosture::default(),
            behavior: metrics([1.2, 0.9, 0.85, 0.75]),
            output: ReportFormat::Summary,
            output_file: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("between 0.0 and 1.0"));
    }

    #[test]
    fn test_format_score_identity_managed() {
        let report = QualityIndexScorer::new(SecurityPosture::new(true, true, true))
            .score(metrics([0.9, 0.95, 0.85, 0.75]));
        let text = format_score(&report);
        assert!(text.contains("3 (Identity managed)"));
        assert!(text.ends_with("API-QI: 0.8436"));
    }

    #[test]
    fn test_missing_metric_shown_as_na() {
        let mut behavior = metrics([0.9, 0.95, 0.85, 0.75]);
        behavior.integrity = None;
        let report = QualityIndexScorer::new(SecurityPosture::default()).score(behavior);
        assert!(format_score(&report).contains("n/a"));
    }

    #[test]
    fn test_matrix_table_has_every_level() {
        let table = format_matrix_table();
        assert_eq!(table.lines().count(), 5);
        assert!(table.contains("0 (Open)"));
        assert!(table.contains("0.333 (High)"));
    }

    #[test]
    fn test_matrix_json_rows_sum_to_one() {
        let json: serde_json::Value = serde_json::from_str(&format_matrix_json().unwrap()).unwrap();
        let levels = json.as_array().unwrap();
        assert_eq!(levels.len(), 4);
        for level in levels {
            let w = &level["weights"];
            let sum: f64 = ["auth", "integrity", "success", "responsibility"]
                .iter()
                .map(|k| w[*k].as_f64().unwrap())
                .sum();
            assert!((sum - 1.0).abs() <= 0.001 + 1e-9);
        }
    }
}

//! Plan command handler.
//!
//! Implements the `plan` subcommand: show how every endpoint would be
//! classified and which URL it would be probed at, without sending anything.

use crate::audit::{AuditEngine, HttpTransport, PlannedProbe};
use crate::config::AppConfig;
use crate::pipeline::{parse_contract_with_context, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

/// Run the plan command.
pub fn run_plan(contract_path: &Path, config: &AppConfig, quiet: bool) -> Result<()> {
    let parsed = parse_contract_with_context(contract_path, quiet)?;

    // The transport is never used; plan() only classifies
    let transport = HttpTransport::new(config.probe_timeout())
        .context("Failed to build HTTP client")?;
    let engine = AuditEngine::new(Box::new(transport), config.target.base_url.clone())
        .with_rules(config.rules.clone());
    let plan = engine.plan(parsed.contract());

    let output_text = match config.output.format {
        ReportFormat::Json => format_plan_json(&plan, &parsed.display_path())?,
        _ => format_plan_table(&plan),
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&output_text, &target, quiet)
}

fn format_plan_json(plan: &[PlannedProbe], contract: &str) -> Result<String> {
    let output = json!({
        "tool": "api-qi",
        "version": env!("CARGO_PKG_VERSION"),
        "contract": contract,
        "probes": plan,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn format_plan_table(plan: &[PlannedProbe]) -> String {
    let mut lines = Vec::with_capacity(plan.len() + 2);
    lines.push(format!(
        "{:<8} {:<40} {:<12} {:<9} {}",
        "METHOD", "PATH", "EXPECTED", "INTEGRITY", "DECLARED"
    ));
    for planned in plan {
        lines.push(format!(
            "{:<8} {:<40} {:<12} {:<9} {}",
            planned.probe.method.as_str(),
            planned.probe.path,
            planned.expectation.label(),
            if planned.integrity_sensitive { "yes" } else { "" },
            planned.declared.join(",")
        ));
    }
    lines.push(String::new());
    lines.push(format!("{} probe(s) planned", plan.len()));
    lines.join("\n")
}

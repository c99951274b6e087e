//! Readiness, probing and scoring stage.

use super::PipelineError;
use crate::audit::{wait_for_ready, AuditEngine, ProbeTransport, SecurityMetrics};
use crate::config::{AppConfig, Validatable};
use crate::model::Contract;
use crate::reports::{AuditReport, ReportMetadata};
use crate::scoring::QualityIndexScorer;

/// Run one complete audit pass and assemble the report.
///
/// Waits for the target first unless `target.skip_readiness` is set. A target
/// that never becomes ready fails the stage before any probe is sent.
pub fn run_audit(
    config: &AppConfig,
    contract: &Contract,
    contract_path: Option<&str>,
    transport: Box<dyn ProbeTransport>,
) -> Result<AuditReport, PipelineError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(PipelineError::InvalidConfig {
            errors: errors.iter().map(ToString::to_string).collect(),
        });
    }

    let engine = AuditEngine::new(transport, config.target.base_url.clone())
        .with_rules(config.rules.clone())
        .with_concurrency(config.target.concurrency);

    if config.target.skip_readiness {
        tracing::debug!("Skipping readiness wait");
    } else {
        let check = config.readiness_check();
        tracing::info!("Waiting up to {:?} for {}", check.timeout, check.url);
        wait_for_ready(engine.transport(), &check).map_err(|source| {
            PipelineError::TargetNotReady {
                url: check.url.clone(),
                source,
            }
        })?;
    }

    let run = engine.run(contract);
    let metrics = SecurityMetrics::from_counters(&run.counters);
    let quality = QualityIndexScorer::new(config.posture).score_audit(&metrics, &config.behavior);
    tracing::info!(
        "Maturity {}, API-QI {:.4}",
        quality.maturity,
        quality.api_qi
    );

    let mut metadata = ReportMetadata::new(config.target.base_url.clone());
    if let Some(path) = contract_path {
        metadata = metadata.with_contract_path(path);
    }
    Ok(AuditReport::new(metadata, contract, run, quality))
}

//! Audit command handler.
//!
//! Implements the `audit` subcommand: wait for the target, probe every
//! endpoint anonymously, score, and report.

use crate::audit::{HttpTransport, ProbeTransport};
use crate::config::AppConfig;
use crate::pipeline::{self, exit_codes, parse_contract_with_context};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Audit command configuration
pub struct AuditCommand {
    pub contract_path: PathBuf,
    pub config: AppConfig,
    /// Exit with [`exit_codes::SCORE_BELOW_THRESHOLD`] below this API-QI
    pub min_score: Option<f64>,
    pub quiet: bool,
}

/// Run the audit command over HTTP, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_audit(command: AuditCommand) -> Result<i32> {
    let transport = HttpTransport::new(command.config.probe_timeout())
        .context("Failed to build HTTP client")?;
    run_audit_with_transport(command, Box::new(transport))
}

/// Run the audit command through an arbitrary transport.
pub fn run_audit_with_transport(
    command: AuditCommand,
    transport: Box<dyn ProbeTransport>,
) -> Result<i32> {
    let parsed = match parse_contract_with_context(&command.contract_path, command.quiet) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!("{err:#}");
            return Ok(exit_codes::ERROR);
        }
    };

    let report = match pipeline::run_audit(
        &command.config,
        parsed.contract(),
        Some(&parsed.display_path()),
        transport,
    ) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("{err:#}");
            return Ok(err.exit_code());
        }
    };

    pipeline::output_report(&command.config.output, &report, command.quiet)?;

    if let Some(threshold) = command.min_score {
        if report.quality.api_qi < threshold {
            tracing::error!(
                "API-QI {:.4} is below minimum threshold {:.4}",
                report.quality.api_qi,
                threshold
            );
            return Ok(exit_codes::SCORE_BELOW_THRESHOLD);
        }
    }

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::model::HttpMethod;
    use crate::reports::ReportFormat;
    use std::path::Path;
    use tempfile::TempDir;

    /// Secure target: rejects every mutation, serves every read.
    struct Secure;

    impl ProbeTransport for Secure {
        fn send(&self, method: HttpMethod, _: &str) -> Result<u16, TransportError> {
            Ok(if method == HttpMethod::Get { 200 } else { 401 })
        }
    }

    struct Down;

    impl ProbeTransport for Down {
        fn send(&self, _: HttpMethod, _: &str) -> Result<u16, TransportError> {
            Err(TransportError::Connect("connection refused".into()))
        }
    }

    fn write_contract(dir: &Path) -> PathBuf {
        let path = dir.join("openapi.yaml");
        std::fs::write(
            &path,
            "paths:\n  /items:\n    get:\n      responses: {'200': {}}\n    post:\n      responses: {'401': {}, '403': {}}\n",
        )
        .unwrap();
        path
    }

    fn command(dir: &Path, min_score: Option<f64>) -> AuditCommand {
        let mut config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(dir.join("report.json")))
            .build();
        config.target.readiness_timeout_secs = 0;
        config.target.poll_interval_ms = 1;
        AuditCommand {
            contract_path: write_contract(dir),
            config,
            min_score,
            quiet: true,
        }
    }

    #[test]
    fn test_secure_target_succeeds_and_writes_report() {
        let tmp = TempDir::new().unwrap();
        let code = run_audit_with_transport(command(tmp.path(), None), Box::new(Secure)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(json["metrics"]["authenticity"], 100.0);
        assert_eq!(json["summary"]["passed"], 2);
    }

    #[test]
    fn test_unready_target_exits_2_without_report() {
        let tmp = TempDir::new().unwrap();
        let code = run_audit_with_transport(command(tmp.path(), None), Box::new(Down)).unwrap();
        assert_eq!(code, exit_codes::TARGET_NOT_READY);
        assert!(!tmp.path().join("report.json").exists());
    }

    #[test]
    fn test_min_score_gate() {
        let tmp = TempDir::new().unwrap();
        let code =
            run_audit_with_transport(command(tmp.path(), Some(0.99)), Box::new(Secure)).unwrap();
        assert_eq!(code, exit_codes::SCORE_BELOW_THRESHOLD);

        let code =
            run_audit_with_transport(command(tmp.path(), Some(0.5)), Box::new(Secure)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_invalid_config_exits_with_error_code() {
        let tmp = TempDir::new().unwrap();
        let mut cmd = command(tmp.path(), None);
        cmd.config.behavior.success = 1.5;
        let code = run_audit_with_transport(cmd, Box::new(Secure)).unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert!(!tmp.path().join("report.json").exists());
    }

    #[test]
    fn test_unparsable_contract_exits_with_error_code() {
        let tmp = TempDir::new().unwrap();
        let mut cmd = command(tmp.path(), None);
        std::fs::write(&cmd.contract_path, "openapi: 3.0.0\ninfo: {}\n").unwrap();
        cmd.min_score = Some(0.0);
        let code = run_audit_with_transport(cmd, Box::new(Secure)).unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert_ne!(code, exit_codes::SCORE_BELOW_THRESHOLD);
    }
}

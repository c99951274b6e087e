//! Configuration types for api-qi operations.

use super::defaults::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_READINESS_PATH,
    DEFAULT_READINESS_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::audit::{AuditRules, ReadinessCheck};
use crate::reports::ReportFormat;
use crate::scoring::{BehaviorInputs, SecurityPosture};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are applied on top of file settings through
/// [`ConfigOverrides`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Target service and probing behavior
    pub target: TargetConfig,
    /// Path rules for classification and integrity checks
    pub rules: AuditRules,
    /// Declared security posture used for the maturity level
    pub posture: SecurityPosture,
    /// Behavior metrics supplied rather than measured
    pub behavior: BehaviorInputs,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Readiness polling derived from the target section.
    #[must_use]
    pub fn readiness_check(&self) -> ReadinessCheck {
        ReadinessCheck::new(format!(
            "{}{}",
            self.target.base_url.trim_end_matches('/'),
            self.target.readiness_path
        ))
        .with_timeout(Duration::from_secs(self.target.readiness_timeout_secs))
        .with_interval(Duration::from_millis(self.target.poll_interval_ms))
    }

    /// Per-probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.target.timeout_secs)
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the target base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.target.base_url = url.into();
        self
    }

    /// Set the number of concurrent probes.
    pub const fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.target.concurrency = concurrency;
        self
    }

    /// Skip the readiness wait.
    pub const fn skip_readiness(mut self, skip: bool) -> Self {
        self.config.target.skip_readiness = skip;
        self
    }

    /// Set the audit path rules.
    pub fn rules(mut self, rules: AuditRules) -> Self {
        self.config.rules = rules;
        self
    }

    /// Set the declared posture.
    pub const fn posture(mut self, posture: SecurityPosture) -> Self {
        self.config.posture = posture;
        self
    }

    /// Set the supplied behavior metrics.
    pub const fn behavior(mut self, behavior: BehaviorInputs) -> Self {
        self.config.behavior = behavior;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Audited service and probing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL every contract path is appended to
    pub base_url: String,
    /// Per-probe timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Probes in flight at once (1 = sequential)
    #[schemars(range(min = 1))]
    pub concurrency: usize,
    /// Path polled with GET until it answers 200
    pub readiness_path: String,
    /// How long to wait for readiness, in seconds
    pub readiness_timeout_secs: u64,
    /// Pause between readiness attempts, in milliseconds
    #[schemars(range(min = 1))]
    pub poll_interval_ms: u64,
    /// Probe immediately without waiting for readiness
    pub skip_readiness: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            readiness_path: DEFAULT_READINESS_PATH.to_string(),
            readiness_timeout_secs: DEFAULT_READINESS_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            skip_readiness: false,
        }
    }
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line. `None` leaves the file setting alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
    pub readiness_path: Option<String>,
    pub readiness_timeout_secs: Option<u64>,
    pub skip_readiness: bool,
    pub auth_required: Option<bool>,
    pub access_control: Option<bool>,
    pub iam: Option<bool>,
    pub success: Option<f64>,
    pub responsibility: Option<f64>,
    pub format: Option<ReportFormat>,
    pub file: Option<PathBuf>,
    pub no_color: bool,
}

impl AppConfig {
    /// Apply CLI values on top of this config.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.target.base_url.clone_from(url);
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.target.timeout_secs = timeout;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.target.concurrency = concurrency;
        }
        if let Some(path) = &overrides.readiness_path {
            self.target.readiness_path.clone_from(path);
        }
        if let Some(timeout) = overrides.readiness_timeout_secs {
            self.target.readiness_timeout_secs = timeout;
        }
        if overrides.skip_readiness {
            self.target.skip_readiness = true;
        }

        if let Some(v) = overrides.auth_required {
            self.posture.auth_required = v;
        }
        if let Some(v) = overrides.access_control {
            self.posture.access_control = v;
        }
        if let Some(v) = overrides.iam {
            self.posture.iam = v;
        }

        if let Some(v) = overrides.success {
            self.behavior.success = v;
        }
        if let Some(v) = overrides.responsibility {
            self.behavior.responsibility = v;
        }

        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if overrides.file.is_some() {
            self.output.file.clone_from(&overrides.file);
        }
        if overrides.no_color {
            self.output.no_color = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.target.base_url, "http://localhost:8000");
        assert_eq!(config.target.timeout_secs, 10);
        assert_eq!(config.target.concurrency, 1);
        assert_eq!(config.rules.collection_path, "/api/v1/books");
        assert!(config.posture.auth_required);
        assert_eq!(config.behavior.success, 0.85);
        assert_eq!(config.behavior.responsibility, 0.75);
        assert_eq!(config.output.format, ReportFormat::Table);
    }

    #[test]
    fn test_readiness_check_from_target() {
        let config = AppConfig::builder().base_url("http://svc:9000/").build();
        let check = config.readiness_check();
        assert_eq!(check.url, "http://svc:9000/api/v1/books");
        assert_eq!(check.timeout, Duration::from_secs(30));
        assert_eq!(check.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        config.apply(&ConfigOverrides {
            base_url: Some("https://staging".into()),
            concurrency: Some(8),
            iam: Some(true),
            access_control: Some(true),
            success: Some(0.5),
            format: Some(ReportFormat::Json),
            no_color: true,
            ..ConfigOverrides::default()
        });
        assert_eq!(config.target.base_url, "https://staging");
        assert_eq!(config.target.concurrency, 8);
        assert!(config.posture.iam && config.posture.access_control);
        assert!(config.posture.auth_required);
        assert_eq!(config.behavior.success, 0.5);
        assert_eq!(config.behavior.responsibility, 0.75);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.output.no_color);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = AppConfig::builder().concurrency(3).skip_readiness(true).build();
        let before = config.clone();
        config.apply(&ConfigOverrides::default());
        assert_eq!(config, before);
    }
}

//! Configuration validation for api-qi.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::MAX_CONCURRENCY;
use super::types::{AppConfig, OutputConfig, TargetConfig};
use crate::audit::AuditRules;
use crate::scoring::BehaviorInputs;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.target.validate());
        errors.extend(self.rules.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for TargetConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "target.base_url",
                format!("Base URL must start with http:// or https://, got '{}'", self.base_url),
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "target.timeout_secs",
                "Probe timeout must be at least 1 second",
            ));
        }

        if !(1..=MAX_CONCURRENCY).contains(&self.concurrency) {
            errors.push(ConfigError::new(
                "target.concurrency",
                format!(
                    "Concurrency must be between 1 and {MAX_CONCURRENCY}, got {}",
                    self.concurrency
                ),
            ));
        }

        if !self.readiness_path.starts_with('/') {
            errors.push(ConfigError::new(
                "target.readiness_path",
                format!("Readiness path must start with '/', got '{}'", self.readiness_path),
            ));
        }

        if self.poll_interval_ms == 0 {
            errors.push(ConfigError::new(
                "target.poll_interval_ms",
                "Poll interval must be at least 1 ms",
            ));
        }

        errors
    }
}

impl Validatable for AuditRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, path) in [
            ("rules.collection_path", &self.collection_path),
            ("rules.item_path", &self.item_path),
        ] {
            if !path.starts_with('/') {
                errors.push(ConfigError::new(
                    field,
                    format!("Path must start with '/', got '{path}'"),
                ));
            }
        }

        if self.id_param.is_empty() {
            errors.push(ConfigError::new("rules.id_param", "Identifier name cannot be empty"));
        }

        if self.probe_value.is_empty() || self.probe_value.contains(['/', '?', '#']) {
            errors.push(ConfigError::new(
                "rules.probe_value",
                format!(
                    "Probe value must be a non-empty path segment, got '{}'",
                    self.probe_value
                ),
            ));
        }

        errors
    }
}

impl Validatable for BehaviorInputs {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("behavior.success", self.success),
            ("behavior.responsibility", self.responsibility),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(
                    field,
                    format!("Value must be between 0.0 and 1.0, got {value}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

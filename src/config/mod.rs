//! Configuration module for api-qi.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument overrides
//!
//! # Quick Start
//!
//! ```rust
//! use api_qi::config::{AppConfig, Validatable};
//!
//! let config = AppConfig::builder()
//!     .base_url("http://localhost:8000")
//!     .concurrency(4)
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.api-qi.yaml` file in your project root or `~/.config/api-qi/`:
//!
//! ```yaml
//! target:
//!   base_url: http://localhost:8000
//! posture:
//!   access_control: true
//! behavior:
//!   success: 0.9
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_READINESS_PATH,
    DEFAULT_READINESS_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY,
};
pub use types::{AppConfig, AppConfigBuilder, ConfigOverrides, OutputConfig, TargetConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option that can be set in `.api-qi.yaml`, for editor
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["target", "rules", "posture", "behavior", "output"] {
            assert!(schema.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }
}

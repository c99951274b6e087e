//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ConfigOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Config file names recognized during discovery, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".api-qi.yaml",
    ".api-qi.yml",
    "api-qi.yaml",
    "api-qi.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/api-qi/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("api-qi")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from an explicit or discovered file, or return default.
///
/// An explicit path must exist and parse. A discovered file that fails to
/// load is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

impl AppConfig {
    /// Load from file and apply CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.apply(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# api-qi configuration
# Place this file at .api-qi.yaml in your project root or ~/.config/api-qi/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# api-qi Configuration File
# ==========================
#
# Place it at:
#   - .api-qi.yaml in your project root
#   - ~/.config/api-qi/api-qi.yaml for global config
#
# CLI arguments always override file settings.

# Audited service
target:
  # Overridden by API_BASE_URL or --base-url
  base_url: http://localhost:8000
  # Per-probe timeout
  timeout_secs: 10
  # Probes in flight at once (1 = sequential, contract order)
  concurrency: 1
  # Polled with GET until it answers 200
  readiness_path: /api/v1/books
  readiness_timeout_secs: 30
  poll_interval_ms: 1000
  skip_readiness: false

# Path rules
rules:
  # Anonymous POST here may answer 201 and is still reported
  collection_path: /api/v1/books
  item_path: /api/v1/books/{book_id}
  id_param: book_id
  # Substituted for every path placeholder
  probe_value: '1'
  # Mutations on the two paths above that must be rejected
  integrity_methods: [POST, DELETE]

# Declared security posture (drives the maturity level)
posture:
  auth_required: true
  access_control: false
  iam: false

# Behavior metrics not measured by probing (0.0-1.0)
behavior:
  success: 0.85
  responsibility: 0.75

# Output configuration
output:
  # Format: table, summary, json, csv, sarif
  format: table
  # Output file path (omit for stdout)
  # file: audit.json
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;
    use crate::reports::ReportFormat;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".api-qi.yaml");
        std::fs::write(&config_path, "target:\n  concurrency: 2\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
target:
  base_url: http://books:8080
  concurrency: 4
rules:
  collection_path: /items
  integrity_methods: [POST, PUT, DELETE]
posture:
  access_control: true
behavior:
  success: 0.9
output:
  format: json
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.target.base_url, "http://books:8080");
        assert_eq!(config.target.concurrency, 4);
        assert_eq!(config.target.timeout_secs, 10);
        assert_eq!(config.rules.collection_path, "/items");
        assert_eq!(config.rules.item_path, "/api/v1/books/{book_id}");
        assert_eq!(
            config.rules.integrity_methods,
            vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
        );
        assert!(config.posture.auth_required);
        assert!(config.posture.access_control);
        assert_eq!(config.behavior.success, 0.9);
        assert_eq!(config.behavior.responsibility, 0.75);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "target:\n  concurrency: many\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_example_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("target:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "target:\n  concurrency: 2").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let result = load_or_default(Some(Path::new("/nonexistent/api-qi.yaml")));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("api-qi.yaml");
        std::fs::write(&config_path, "target:\n  concurrency: many\n").unwrap();

        let result = AppConfig::from_file_with_overrides(
            Some(&config_path),
            &ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("api-qi.yaml");
        std::fs::write(&config_path, "target:\n  concurrency: 3\n").unwrap();

        let (config, from) = load_or_default(Some(&config_path)).unwrap();
        assert_eq!(config.target.concurrency, 3);
        assert_eq!(from, Some(config_path));
    }
}

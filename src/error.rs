//! Unified error types for api-qi.
//!
//! Contract loading, readiness and configuration failures are control flow and
//! surface as [`AuditError`]. Per-probe transport failures are data: they are
//! recorded in the report as [`TransportError`] values and never abort a pass.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for api-qi operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuditError {
    /// Errors while loading or interpreting an API contract
    #[error("Failed to load contract: {context}")]
    Contract {
        context: String,
        #[source]
        source: ContractErrorKind,
    },

    /// The target never answered the readiness probe with success
    #[error("Target {url} was not ready after {waited:?}")]
    Readiness { url: String, waited: Duration },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific contract error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContractErrorKind {
    #[error("Document is neither valid YAML nor JSON: {0}")]
    Syntax(String),

    #[error("Document has no 'paths' section")]
    MissingPaths,
}

/// Failure of a single probe round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TransportError {
    /// No response within the per-probe timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established (refused, DNS, TLS handshake)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending the request or reading the status line
    #[error("request failed: {0}")]
    Request(String),

    /// The resolved probe URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Short label used in tabular output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::Connect(_) => "CONNECT",
            Self::Request(_) => "ERROR",
            Self::InvalidUrl(_) => "BAD URL",
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for api-qi operations
pub type Result<T> = std::result::Result<T, AuditError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AuditError {
    /// Create a contract error with context
    pub fn contract(context: impl Into<String>, source: ContractErrorKind) -> Self {
        Self::Contract {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a readiness error
    pub fn not_ready(url: impl Into<String>, waited: Duration) -> Self {
        Self::Readiness {
            url: url.into(),
            waited,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error means the target never became ready.
    #[must_use]
    pub const fn is_readiness(&self) -> bool {
        matches!(self, Self::Readiness { .. })
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for AuditError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::contract("parsing document", ContractErrorKind::Syntax(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward: `outer: inner: original`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AuditError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: AuditError, new_ctx: &str) -> AuditError {
    match err {
        AuditError::Contract {
            context: existing,
            source,
        } => AuditError::Contract {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AuditError::Io {
            path,
            message,
            source,
        } => AuditError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AuditError::Config(msg) => AuditError::Config(chain_context(new_ctx, &msg)),
        AuditError::Validation(msg) => AuditError::Validation(chain_context(new_ctx, &msg)),
        readiness @ AuditError::Readiness { .. } => readiness,
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

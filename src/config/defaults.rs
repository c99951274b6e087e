//! Default values for api-qi configuration.

/// Target service when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Sequential probing.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Polled until it answers 200.
pub const DEFAULT_READINESS_PATH: &str = "/api/v1/books";

pub const DEFAULT_READINESS_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Upper bound for `target.concurrency`.
pub const MAX_CONCURRENCY: usize = 64;

//! Wait for the audited service to come up before probing it.

use super::ProbeTransport;
use crate::error::{AuditError, Result};
use crate::model::HttpMethod;
use std::time::{Duration, Instant};

/// Readiness polling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessCheck {
    /// URL polled with `GET`
    pub url: String,
    /// Give up after this long
    pub timeout: Duration,
    /// Pause between attempts
    pub interval: Duration,
}

impl ReadinessCheck {
    /// Poll `url` with the default 30 s budget and 1 s interval.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            interval: Duration::from_secs(1),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Block until the target answers `200`, or fail once the budget is spent.
///
/// At least one attempt is made even with a zero timeout. Transport errors
/// and other statuses are retried silently. Returns the time waited.
pub fn wait_for_ready(transport: &dyn ProbeTransport, check: &ReadinessCheck) -> Result<Duration> {
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match transport.send(HttpMethod::Get, &check.url) {
            Ok(200) => {
                let waited = start.elapsed();
                tracing::info!("Target ready after {attempts} attempt(s) ({waited:?})");
                return Ok(waited);
            }
            Ok(status) => tracing::debug!("Readiness attempt {attempts}: status {status}"),
            Err(err) => tracing::debug!("Readiness attempt {attempts}: {err}"),
        }

        let elapsed = start.elapsed();
        if elapsed >= check.timeout {
            return Err(AuditError::not_ready(&check.url, elapsed));
        }
        std::thread::sleep(check.interval.min(check.timeout - elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with a connect error for the first `failures` calls, then returns 200.
    struct WarmingUp {
        failures: u32,
        calls: AtomicU32,
    }

    impl ProbeTransport for WarmingUp {
        fn send(&self, _: HttpMethod, _: &str) -> std::result::Result<u16, TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(TransportError::Connect("refused".into()))
            } else {
                Ok(200)
            }
        }
    }

    struct AlwaysStatus(u16);

    impl ProbeTransport for AlwaysStatus {
        fn send(&self, _: HttpMethod, _: &str) -> std::result::Result<u16, TransportError> {
            Ok(self.0)
        }
    }

    fn fast(url: &str) -> ReadinessCheck {
        ReadinessCheck::new(url)
            .with_timeout(Duration::from_millis(500))
            .with_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_ready_immediately() {
        let transport = WarmingUp {
            failures: 0,
            calls: AtomicU32::new(0),
        };
        wait_for_ready(&transport, &fast("http://t/api/v1/books")).unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ready_after_retries() {
        let transport = WarmingUp {
            failures: 3,
            calls: AtomicU32::new(0),
        };
        wait_for_ready(&transport, &fast("http://t/api/v1/books")).unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_never_ready() {
        let check = ReadinessCheck::new("http://t/api/v1/books")
            .with_timeout(Duration::from_millis(30))
            .with_interval(Duration::from_millis(5));
        let err = wait_for_ready(&AlwaysStatus(503), &check).unwrap_err();
        assert!(err.is_readiness());
        assert!(err.to_string().contains("http://t/api/v1/books"));
    }

    #[test]
    fn test_zero_timeout_still_attempts_once() {
        let check = ReadinessCheck::new("http://t/").with_timeout(Duration::ZERO);
        assert!(wait_for_ready(&AlwaysStatus(200), &check).is_ok());
        assert!(wait_for_ready(&AlwaysStatus(500), &check).is_err());
    }
}

//! Anonymous endpoint probing.

use super::AuditRules;
use crate::error::{AuditError, Result, TransportError};
use crate::model::HttpMethod;
use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;
use std::time::Duration;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Path template parameters never contain braces or slashes
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}").expect("static regex"));

/// Sends a single anonymous request and reports the status code.
///
/// Implementations must not retry, must not attach credentials, and must map
/// every failure to a [`TransportError`] instead of panicking.
pub trait ProbeTransport: Send + Sync {
    /// Issue `method url` and return the response status.
    fn send(&self, method: HttpMethod, url: &str) -> std::result::Result<u16, TransportError>;

    /// Short name for log output.
    fn name(&self) -> &'static str {
        "transport"
    }
}

/// Blocking HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client with the given per-request timeout.
    ///
    /// Redirects are not followed: a 302 to a login page is a status to
    /// classify, not a hop to chase.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AuditError::config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl ProbeTransport for HttpTransport {
    fn send(&self, method: HttpMethod, url: &str) -> std::result::Result<u16, TransportError> {
        let response = self.client.request(method.into(), url).send()?;
        Ok(response.status().as_u16())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Join the base URL and a contract path, substituting path placeholders.
///
/// The identifier placeholder and any other `{param}` are replaced by the
/// probe value, so no literal braces reach the wire.
#[must_use]
pub fn resolve_url(base_url: &str, path: &str, rules: &AuditRules) -> String {
    let resolved = PLACEHOLDER.replace_all(path, |caps: &regex::Captures<'_>| {
        if caps[1] != rules.id_param {
            tracing::debug!("Substituting probe value for placeholder {{{}}} in {path}", &caps[1]);
        }
        rules.probe_value.clone()
    });
    format!("{}{}", base_url.trim_end_matches('/'), resolved)
}

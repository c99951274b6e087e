//! Contract model: path → method → endpoint metadata.

use super::HttpMethod;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Metadata the contract declares for one (path, method) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMeta {
    /// Declared response codes, as written in the document (`"200"`, `"401"`, `"default"`, ...)
    pub responses: BTreeSet<String>,
    /// `operationId`, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// `summary`, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl EndpointMeta {
    /// Build metadata from a list of declared response codes.
    pub fn with_responses<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: codes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether the given response code is declared.
    #[must_use]
    pub fn declares(&self, code: &str) -> bool {
        self.responses.contains(code)
    }

    /// Whether the contract declares an authentication or authorization rejection.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.declares("401") || self.declares("403")
    }
}

/// Methods declared on one path, in document order.
pub type PathItem = IndexMap<HttpMethod, EndpointMeta>;

/// In-memory API contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contract {
    /// `info.title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `info.version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Paths in document order
    pub paths: IndexMap<String, PathItem>,
}

/// Borrowed view of a single declared endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub meta: &'a EndpointMeta,
}

impl Contract {
    /// Create an empty contract.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an endpoint. Re-declaring a (path, method) pair replaces its metadata.
    pub fn insert(&mut self, path: impl Into<String>, method: HttpMethod, meta: EndpointMeta) {
        self.paths.entry(path.into()).or_default().insert(method, meta);
    }

    /// Builder-style variant of [`Contract::insert`].
    #[must_use]
    pub fn with_endpoint(mut self, path: &str, method: HttpMethod, responses: &[&str]) -> Self {
        self.insert(path, method, EndpointMeta::with_responses(responses.iter().copied()));
        self
    }

    /// Look up one endpoint.
    #[must_use]
    pub fn get(&self, path: &str, method: HttpMethod) -> Option<&EndpointMeta> {
        self.paths.get(path).and_then(|item| item.get(&method))
    }

    /// Iterate every declared endpoint in document order.
    pub fn endpoints(&self) -> impl Iterator<Item = Endpoint<'_>> {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter().map(move |(method, meta)| Endpoint {
                path: path.as_str(),
                method: *method,
                meta,
            })
        })
    }

    /// Total number of (path, method) pairs.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }

    /// Number of endpoints that declare a 401 or 403 response.
    #[must_use]
    pub fn protected_count(&self) -> usize {
        self.endpoints().filter(|e| e.meta.is_protected()).count()
    }

    /// Whether the contract declares no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoint_count() == 0
    }

    /// Display name: title and version when known.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.title, &self.version) {
            (Some(t), Some(v)) => format!("{t} {v}"),
            (Some(t), None) => t.clone(),
            _ => "untitled contract".to_string(),
        }
    }
}

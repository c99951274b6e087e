//! Expectation classification.
//!
//! Decides, before any request is sent, what an anonymous caller should see
//! for each declared endpoint.

use crate::model::{EndpointMeta, Expectation, HttpMethod};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path-specific rules applied on top of the contract's declared responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuditRules {
    /// Collection root; an anonymous `POST` here may answer 201
    pub collection_path: String,
    /// Item path under the collection
    pub item_path: String,
    /// Name of the identifier placeholder in path templates
    pub id_param: String,
    /// Value substituted for path placeholders
    pub probe_value: String,
    /// Methods that count as integrity-sensitive on the collection and item paths
    pub integrity_methods: Vec<HttpMethod>,
}

impl Default for AuditRules {
    fn default() -> Self {
        Self {
            collection_path: "/api/v1/books".to_string(),
            item_path: "/api/v1/books/{book_id}".to_string(),
            id_param: "book_id".to_string(),
            probe_value: "1".to_string(),
            integrity_methods: vec![HttpMethod::Post, HttpMethod::Delete],
        }
    }
}

impl AuditRules {
    /// Classify one endpoint.
    ///
    /// Total over all inputs: anything not declaring 401/403 is public.
    #[must_use]
    pub fn classify(&self, path: &str, method: HttpMethod, meta: &EndpointMeta) -> Expectation {
        if !meta.is_protected() {
            return Expectation::PublicSuccess;
        }
        if method == HttpMethod::Post && path == self.collection_path {
            Expectation::ProtectedOrCreated
        } else {
            Expectation::Protected
        }
    }

    /// Whether a request is a mutation whose anonymous success breaks integrity.
    #[must_use]
    pub fn is_integrity_sensitive(&self, path: &str, method: HttpMethod) -> bool {
        (path == self.collection_path || path == self.item_path)
            && self.integrity_methods.contains(&method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(codes: &[&str]) -> EndpointMeta {
        EndpointMeta::with_responses(codes.iter().copied())
    }

    #[test]
    fn test_declared_rejection_is_protected() {
        let rules = AuditRules::default();
        assert_eq!(
            rules.classify("/api/v1/login", HttpMethod::Post, &meta(&["200", "401"])),
            Expectation::Protected
        );
        assert_eq!(
            rules.classify("/items", HttpMethod::Get, &meta(&["403"])),
            Expectation::Protected
        );
    }

    #[test]
    fn test_collection_post_override() {
        let rules = AuditRules::default();
        assert_eq!(
            rules.classify("/api/v1/books", HttpMethod::Post, &meta(&["201", "401", "403"])),
            Expectation::ProtectedOrCreated
        );
        // Only applies when the endpoint is protected in the first place
        assert_eq!(
            rules.classify("/api/v1/books", HttpMethod::Post, &meta(&["201"])),
            Expectation::PublicSuccess
        );
        // And only to POST
        assert_eq!(
            rules.classify("/api/v1/books", HttpMethod::Delete, &meta(&["401"])),
            Expectation::Protected
        );
    }

    #[test]
    fn test_undeclared_responses_default_to_public() {
        let rules = AuditRules::default();
        assert_eq!(
            rules.classify("/api/v1/books", HttpMethod::Get, &EndpointMeta::default()),
            Expectation::PublicSuccess
        );
    }

    #[test]
    fn test_integrity_sensitivity() {
        let rules = AuditRules::default();
        assert!(rules.is_integrity_sensitive("/api/v1/books", HttpMethod::Post));
        assert!(rules.is_integrity_sensitive("/api/v1/books/{book_id}", HttpMethod::Delete));
        assert!(!rules.is_integrity_sensitive("/api/v1/books", HttpMethod::Get));
        assert!(!rules.is_integrity_sensitive("/api/v1/register", HttpMethod::Post));
    }

    #[test]
    fn test_custom_collection() {
        let rules = AuditRules {
            collection_path: "/items".into(),
            item_path: "/items/{id}".into(),
            id_param: "id".into(),
            ..AuditRules::default()
        };
        assert_eq!(
            rules.classify("/items", HttpMethod::Post, &meta(&["401", "403"])),
            Expectation::ProtectedOrCreated
        );
        assert!(rules.is_integrity_sensitive("/items/{id}", HttpMethod::Delete));
    }
}

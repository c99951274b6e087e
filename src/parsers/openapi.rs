//! OpenAPI / Swagger path extraction.

use crate::error::{AuditError, ContractErrorKind, Result};
use crate::model::{Contract, EndpointMeta, HttpMethod};
use serde_yaml::Value;

/// Surface syntax of a contract document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSyntax {
    Json,
    Yaml,
}

impl DocumentSyntax {
    /// JSON documents are objects; everything else is read as YAML.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Parser for OpenAPI 3.x and Swagger 2.0 documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiParser;

impl OpenApiParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse document text into a [`Contract`].
    pub fn parse_str(&self, content: &str) -> Result<Contract> {
        let doc: Value = match DocumentSyntax::detect(content) {
            DocumentSyntax::Json => serde_json::from_str(content).map_err(|e| {
                AuditError::contract("parsing JSON", ContractErrorKind::Syntax(e.to_string()))
            })?,
            DocumentSyntax::Yaml => serde_yaml::from_str(content)?,
        };
        self.parse_value(&doc)
    }

    /// Interpret an already-deserialized document.
    pub fn parse_value(&self, doc: &Value) -> Result<Contract> {
        if !doc.is_mapping() {
            return Err(AuditError::contract(
                "reading document root",
                ContractErrorKind::Syntax("top level is not a mapping".to_string()),
            ));
        }

        if let Some(version) = doc.get("openapi").or_else(|| doc.get("swagger")) {
            tracing::debug!("Contract declares format version {}", scalar_to_string(version).unwrap_or_default());
        }

        let mut contract = Contract::new();
        if let Some(info) = doc.get("info") {
            contract.title = info.get("title").and_then(scalar_to_string);
            contract.version = info.get("version").and_then(scalar_to_string);
        }

        let paths = doc
            .get("paths")
            .and_then(Value::as_mapping)
            .ok_or_else(|| AuditError::contract("reading paths", ContractErrorKind::MissingPaths))?;

        for (key, item) in paths {
            let path = scalar_to_string(key).unwrap_or_default();
            if !path.starts_with('/') {
                tracing::warn!("Skipping path '{path}': paths must start with '/'");
                continue;
            }

            let Some(item) = item.as_mapping() else {
                tracing::warn!("Skipping path {path}: path item is not a mapping");
                continue;
            };

            for (method_key, operation) in item {
                let method_name = scalar_to_string(method_key).unwrap_or_default();
                let Some(method) = HttpMethod::from_key(&method_name) else {
                    tracing::debug!("Skipping non-method key '{method_name}' under {path}");
                    continue;
                };
                let meta = parse_operation(&path, method, operation);
                contract.insert(path.clone(), method, meta);
            }
        }

        tracing::debug!(
            "Parsed {} with {} endpoints across {} paths",
            contract.display_name(),
            contract.endpoint_count(),
            contract.paths.len()
        );
        Ok(contract)
    }
}

/// Malformed operations keep their endpoint with no declared responses.
fn parse_operation(path: &str, method: HttpMethod, operation: &Value) -> EndpointMeta {
    if operation.is_null() {
        return EndpointMeta::default();
    }
    if !operation.is_mapping() {
        tracing::warn!("{method} {path} is not a mapping; treating it as public");
        return EndpointMeta::default();
    }

    let responses = operation
        .get("responses")
        .and_then(Value::as_mapping)
        .map(|codes| codes.keys().filter_map(scalar_to_string).collect())
        .unwrap_or_default();

    EndpointMeta {
        responses,
        operation_id: operation.get("operationId").and_then(scalar_to_string),
        summary: operation.get("summary").and_then(scalar_to_string),
    }
}

/// Response codes may be written quoted (`"401"`) or bare (`401`).
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

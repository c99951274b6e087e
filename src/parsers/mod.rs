//! Contract document parsers.
//!
//! Contracts are OpenAPI 3.x or Swagger 2.0 documents in YAML or JSON. Only
//! the `paths` section is interpreted: every path item is reduced to the
//! methods it declares and the response codes each method promises.
//!
//! ```no_run
//! use api_qi::parsers::parse_contract;
//! use std::path::Path;
//!
//! let contract = parse_contract(Path::new("openapi.yaml")).unwrap();
//! println!("{} endpoints", contract.endpoint_count());
//! ```

mod openapi;

pub use openapi::{DocumentSyntax, OpenApiParser};

use crate::error::{AuditError, ErrorContext, Result};
use crate::model::Contract;
use std::path::Path;

/// Maximum contract file size (64 MB).
const MAX_CONTRACT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Read and parse a contract file.
pub fn parse_contract(path: &Path) -> Result<Contract> {
    let metadata = std::fs::metadata(path).map_err(|e| AuditError::io(path, e))?;
    if metadata.len() > MAX_CONTRACT_FILE_SIZE {
        return Err(AuditError::validation(format!(
            "contract {} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_CONTRACT_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
    parse_contract_str(&content).with_context(|| format!("at {}", path.display()))
}

/// Parse a contract from YAML or JSON text.
pub fn parse_contract_str(content: &str) -> Result<Contract> {
    OpenApiParser::new().parse_str(content)
}

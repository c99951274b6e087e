//! Contract loading stage.

use crate::model::Contract;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A parsed contract together with where it came from.
#[derive(Debug, Clone)]
pub struct ParsedContract {
    pub contract: Contract,
    pub path: PathBuf,
}

impl ParsedContract {
    #[must_use]
    pub const fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Path as shown in reports.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Parse a contract with context for error messages
pub fn parse_contract_with_context(path: &Path, quiet: bool) -> Result<ParsedContract> {
    if !quiet {
        tracing::info!("Loading contract: {}", path.display());
    }

    // Parser errors already name the file
    let contract = crate::parsers::parse_contract(path)?;

    if contract.is_empty() {
        tracing::warn!("{} declares no endpoints", path.display());
    } else if !quiet {
        tracing::info!(
            "Loaded {} endpoints ({} protected) from {}",
            contract.endpoint_count(),
            contract.protected_count(),
            contract.display_name()
        );
    }

    Ok(ParsedContract {
        contract,
        path: path.to_path_buf(),
    })
}

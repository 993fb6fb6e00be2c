// crates/tempo-cli/src/commands/validate.rs
//
// `tempo validate <file>`: check a params or genesis JSON document against
// the module's parameter rules before it is proposed.

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;

use tempo_inflation::{GenesisState, InflationError, Params};

use crate::output::{format_json, OutputFormat};

/// Arguments for the validate command.
#[derive(Debug, Args)]
pub struct ValidateCmd {
    /// Path to a JSON file holding either `Params` or a `GenesisState`.
    pub path: PathBuf,
}

/// What kind of document was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Params,
    Genesis,
}

/// Run the validate command. Exits non-zero on an invalid document.
pub fn run(cmd: &ValidateCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&cmd.path)?;
    let (kind, result) = validate_document(&contents)?;

    let label = match kind {
        DocumentKind::Params => "params",
        DocumentKind::Genesis => "genesis",
    };
    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "kind": label,
                "valid": result.is_ok(),
                "error": result.as_ref().err().map(|e| e.to_string()),
            });
            println!("{}", format_json(&report));
        }
        OutputFormat::Table => match &result {
            Ok(()) => println!("{}: valid {}", cmd.path.display(), label),
            Err(e) => println!("{}: invalid {}: {}", cmd.path.display(), label, e),
        },
    }

    result.map_err(|e| e.into())
}

/// Parse `contents` as genesis (if it has a `params` field) or params, then
/// validate. The outer error is a parse failure; the inner one a rule violation.
fn validate_document(
    contents: &str,
) -> Result<(DocumentKind, Result<(), InflationError>), serde_json::Error> {
    let value: Value = serde_json::from_str(contents)?;
    if value.get("params").is_some() {
        let genesis: GenesisState = serde_json::from_value(value)?;
        Ok((DocumentKind::Genesis, genesis.validate()))
    } else {
        let params: Params = serde_json::from_value(value)?;
        Ok((DocumentKind::Params, params.validate().map_err(InflationError::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_inflation::ParamsError;

    const PARAMS_JSON: &str = r#"{
        "min_inflation": "0.05",
        "max_inflation": "0.20",
        "min_bonded": "0.60",
        "max_bonded": "0.80",
        "inflation_change": "0.000001",
        "max_block_duration_secs": 60,
        "inflation_recipients": [
            {"address": "validators", "share": "0.6"},
            {"address": "community_pool", "share": "0.4"}
        ]
    }"#;

    #[test]
    fn test_valid_params_document() {
        let (kind, result) = validate_document(PARAMS_JSON).unwrap();
        assert_eq!(kind, DocumentKind::Params);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_shares_reported() {
        let doc = PARAMS_JSON.replace("\"0.4\"", "\"0.39\"");
        let (_, result) = validate_document(&doc).unwrap();
        assert!(matches!(
            result,
            Err(InflationError::InvalidParams(ParamsError::SharesDoNotSumToOne(_)))
        ));
    }

    #[test]
    fn test_genesis_document() {
        let doc = format!(
            r#"{{"params": {}, "last_block_info": {{"inflation": "0.1", "time": "2024-01-01T00:00:00Z"}}}}"#,
            PARAMS_JSON
        );
        let (kind, result) = validate_document(&doc).unwrap();
        assert_eq!(kind, DocumentKind::Genesis);
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        assert!(validate_document("{\"min_inflation\": ").is_err());
    }
}

//! Handles the optional JSON schema validation of catalog snapshots.
//!
//! This uses the `jsonschema` crate as specified in `Cargo.toml`.

use crate::errors::PresenterError;
use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Validates a given snapshot file against a schema string.
pub fn validate_json_schema(schema_str: &str, json_file_path: &Path) -> Result<(), PresenterError> {
    info!("Compiling catalog snapshot schema...");
    let schema_json: Value = serde_json::from_str(schema_str).map_err(PresenterError::Serde)?;
    let compiled_schema = jsonschema::validator_for(&schema_json)
        .map_err(|e| PresenterError::Validation(e.to_string()))?;

    let file = File::open(json_file_path)
        .map_err(|e| PresenterError::Io(e, "Failed to open input for validation".to_string()))?;
    let reader = BufReader::new(file);
    let instance: Value = serde_json::from_reader(reader).map_err(PresenterError::Serde)?;

    info!("Checking snapshot against the catalog schema...");

    if compiled_schema.is_valid(&instance) {
        info!("Snapshot conforms to the catalog schema.");
        Ok(())
    } else {
        Err(PresenterError::Validation(
            "Input file failed schema validation. The file does not conform to the catalog snapshot schema.".to_string()
        ))
    }
}

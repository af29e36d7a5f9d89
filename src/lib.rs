//! Main library for the spdx-presenter.
//!
//! This crate projects a package catalog snapshot into an SPDX 2.2
//! document and serializes it with the tag-value encoding.

// Make modules public within the crate but not necessarily public API
pub mod catalog;
pub mod document;
pub mod errors;
pub mod license;
pub mod presenter;
pub mod schema;
pub mod tagvalue;

use errors::PresenterError;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level configuration for a presentation run.
#[derive(Debug)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub validate: bool,
}

/// The main entry point for the presentation logic.
///
/// This function opens the files, handles validation, and runs the
/// presenter against the parsed catalog snapshot.
pub fn run(config: Config) -> Result<(), PresenterError> {
    let start_time = Instant::now();
    info!("Presenting catalog snapshot as SPDX 2.2 tag-value");
    info!("  Input: {}", config.input_file.display());
    info!("  Output: {}", config.output_file.display());

    // --- 1. Validation (Optional) ---
    if config.validate {
        let schema_start = Instant::now();
        info!("Running pre-validation...");
        schema::validate_json_schema(
            include_str!("../schemas/catalog.schema.json"),
            &config.input_file,
        )?;
        info!(
            "Validation passed successfully. (Took {:.2?})",
            schema_start.elapsed()
        );
    } else {
        info!("Skipping pre-validation.");
    }

    // --- 2. Load the catalog snapshot ---
    let input_file = File::open(&config.input_file)
        .map_err(|e| PresenterError::Io(e, "Failed to open input file".to_string()))?;
    let snapshot: catalog::Snapshot = serde_json::from_reader(BufReader::new(input_file))?;
    info!(
        "Loaded {} packages from catalog snapshot",
        snapshot.catalog.package_count()
    );

    // --- 3. Present ---
    let output_file = File::create(&config.output_file)
        .map_err(|e| PresenterError::Io(e, "Failed to create output file".to_string()))?;
    let mut output_writer = BufWriter::new(output_file);

    presenter::present(
        &snapshot.catalog,
        &snapshot.source,
        &license::SpdxLicenseList,
        &presenter::SystemClock,
        &presenter::ToolMetadata::from_build(),
        &mut output_writer,
    )?;

    info!("Document written successfully.");
    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}

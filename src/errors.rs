//! Defines the custom error types for the application.
//!
//! This uses `thiserror` as specified in `Cargo.toml` for clean,
//! boilerplate-free error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("JSON Deserialization Error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("JSON Schema Validation Error: {0}")]
    Validation(String),

    #[error("Tag-Value Encoding Error: {0}")]
    Encode(#[source] std::io::Error),
}

// Implement From<io::Error> for easier error handling
impl From<std::io::Error> for PresenterError {
    fn from(err: std::io::Error) -> Self {
        PresenterError::Io(err, "IO operation failed".to_string())
    }
}

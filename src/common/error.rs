//! Error types for the posts API test suite
//!
//! Assertion failures and transport failures both fail a case; the
//! distinction only matters for how the case is classified in the report.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test suite
#[derive(Error, Debug)]
pub enum Error {
    // === Assertion Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Schema Errors ===
    #[error("Schema '{name}' not found. Known schemas: {known}")]
    SchemaNotFound { name: String, known: String },

    #[error("Schema '{name}' could not be compiled: {reason}")]
    SchemaCompile { name: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Suite Outcome ===
    #[error("{failed} of {total} test cases failed")]
    SuiteFailed { failed: usize, total: usize },
}

impl Error {
    /// Create an assertion error from anything displayable
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::TestAssertion(message.into())
    }

    /// Create a schema compile error
    pub fn schema_compile(name: &str, reason: impl ToString) -> Self {
        Self::SchemaCompile {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a file write error for `path`
    pub fn file_write(path: &Path, error: impl ToString) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Whether this error is an assertion mismatch rather than an
    /// infrastructure problem (transport, schema loading, IO)
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::TestAssertion(_))
    }
}

//! Error types for registry and customer ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading inputs.
///
/// Only schema and file errors are raised; empty or unrecognizable
/// registry sources degrade to "no candidates" instead.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Schema Errors ===
    /// A required customer column is absent from every row.
    #[error(
        "required customer field '{field}' not found (columns present: {})",
        .present.join(", ")
    )]
    MissingField { field: String, present: Vec<String> },

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse a JSON file.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

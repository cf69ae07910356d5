//! Error types for outcome row ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading outcome rows.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("input file {path} is {size} bytes (limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] ::csv::Error),

    /// Malformed JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Required column not found in the header row.
    #[error("required column '{column}' not found (headers: {headers})")]
    MissingColumn {
        column: &'static str,
        headers: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

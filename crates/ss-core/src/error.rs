//! Error types for stackstat

use thiserror::Error;

/// stackstat error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record matched the requested capacity unit.
    #[error("no records with design capacity unit '{unit}'")]
    EmptyResult {
        /// Unit that was requested.
        unit: String,
    },

    /// A design capacity that cannot be placed in any bin (negative or non-finite).
    #[error("invalid design capacity: {value}")]
    InvalidCapacity {
        /// Offending value.
        value: f64,
    },

    /// Malformed input data (file and line are part of the message).
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Failure reported by the plotting collaborator.
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

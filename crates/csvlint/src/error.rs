//! Error types for csvlint.
//!
//! Bad CSV data is never an error: it is reported as a
//! [`ValidationMessage`](crate::ValidationMessage). These variants cover
//! loading profiles, building options and reading input.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csvlint operations.
#[derive(Debug, Error)]
pub enum CsvLintError {
    /// Error reading or accessing a file or stream.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile document could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column's regular expression failed to compile.
    #[error("Invalid regex for column '{column}': {source}")]
    Regex {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// Profile violates one of its invariants.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Validation options are unusable (e.g. separator equals quote).
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl CsvLintError {
    /// Wrap an I/O error that has no file path attached.
    pub(crate) fn stream(source: std::io::Error) -> Self {
        CsvLintError::Io {
            path: PathBuf::from("<stream>"),
            source,
        }
    }
}

/// Result type alias for csvlint operations.
pub type Result<T> = std::result::Result<T, CsvLintError>;

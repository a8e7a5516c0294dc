//! Error types for the docfield-core library.
//!
//! Missing fields are never errors: an unmatched field is represented by the
//! `"Not found"` sentinel in the record. These variants cover caller contract
//! violations and the ambient concerns around the engine (config, I/O).

use thiserror::Error;

/// Main error type for the docfield library.
#[derive(Error, Debug)]
pub enum DocfieldError {
    /// The caller broke the input contract (e.g. `text` is not a string).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the docfield library.
pub type Result<T> = std::result::Result<T, DocfieldError>;

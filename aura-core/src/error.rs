//! Error types for aura-core

use thiserror::Error;

/// Main error type for the aura-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A check-in could not be turned into an entry
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Not enough entries for an operation that refuses to run on less
    #[error("need at least {required} entries, have {actual}")]
    InsufficientEntries { required: usize, actual: usize },

    /// Remote aura report failure
    #[error("report error: {0}")]
    Report(String),
}

/// Result type alias for aura-core
pub type Result<T> = std::result::Result<T, Error>;

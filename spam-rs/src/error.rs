//! Error types for spam-rs

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Spam classifier error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A pretrained artifact is malformed or inconsistent
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// A vector does not have the width an artifact was fit on
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Input rejected by an artifact
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

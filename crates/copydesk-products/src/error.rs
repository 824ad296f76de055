//! Error types for product lookup.

use thiserror::Error;

/// Errors that can occur during product lookup.
#[derive(Error, Debug)]
pub enum ProductError {
    /// Configuration error (missing environment variable, bad endpoint).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Embedding generation failed.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// The index query failed.
    #[error("index query failed: {0}")]
    Query(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for product lookup operations.
pub type Result<T> = std::result::Result<T, ProductError>;

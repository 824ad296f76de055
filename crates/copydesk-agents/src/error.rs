//! Error types for the agents crate.

use thiserror::Error;

/// Errors that can occur in collaborator operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration error (missing environment variable, bad endpoint).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Model invocation failed.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Response parsing failed.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// A search request failed.
    #[error("search request failed: {0}")]
    Search(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for collaborator operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::Configuration("missing AZURE_OPENAI_ENDPOINT".into());
        assert_eq!(
            err.to_string(),
            "configuration error: missing AZURE_OPENAI_ENDPOINT"
        );

        let err = AgentError::Search("entity lookup timed out".into());
        assert_eq!(err.to_string(), "search request failed: entity lookup timed out");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AgentError = json_err.into();
        assert!(matches!(err, AgentError::Serialization(_)));
    }
}

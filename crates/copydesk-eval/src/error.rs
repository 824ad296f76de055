//! Error types for the evaluation crate.

use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The judge model call failed.
    #[error("judge call failed: {0}")]
    Agent(#[from] copydesk_agents::AgentError),

    /// The judge reply did not contain a usable score.
    #[error("no usable score in judge reply: {0}")]
    Unscored(String),

    /// Reading or writing evaluation data failed.
    #[error("evaluation data error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

//! Error types for the orchestration layer.

use thiserror::Error;

/// Errors that can end an article run early.
///
/// None of these reach the event stream; a failed run simply stops
/// producing events. They exist so the driving task can log the reason.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// A generation role call failed outright.
    #[error("collaborator call failed: {0}")]
    Agent(#[from] copydesk_agents::AgentError),

    /// The product lookup failed.
    #[error("product lookup failed: {0}")]
    Product(#[from] copydesk_products::ProductError),

    /// The event consumer dropped the receiving end.
    #[error("event consumer disconnected")]
    ChannelClosed,
}

/// Result type for orchestration operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

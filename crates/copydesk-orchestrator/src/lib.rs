//! Article generation orchestration for Copydesk.
//!
//! This crate is the coordinating core of the pipeline: it drives the
//! researcher, product lookup, writer, and editor collaborators through a
//! linear pipeline with a bounded feedback loop, and emits progress as a
//! lazy, pull-driven sequence of [`copydesk_models::RunEvent`]s.
//!
//! The collaborators are injected as trait objects, so the loop is fully
//! testable with deterministic stubs; see the tests in [`orchestrator`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use copydesk_agents::{ChatClient, LlmEditor, LlmWriter, ModelConfig, SearchClient, SearchResearcher};
//! use copydesk_orchestrator::ArticleOrchestrator;
//! use copydesk_products::VectorProductSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chat = ChatClient::from_env()?;
//! let config = ModelConfig::from_env()?;
//!
//! let orchestrator = ArticleOrchestrator::new(
//!     Arc::new(SearchResearcher::new(
//!         chat.clone(),
//!         SearchClient::from_env()?,
//!         config.clone().with_max_tokens(512),
//!     )),
//!     Arc::new(VectorProductSource::from_env()?),
//!     Arc::new(LlmWriter::new(chat.clone(), config.clone())),
//!     Arc::new(LlmEditor::new(chat, config)),
//! );
//!
//! let mut events = orchestrator.run("Find the latest camping trends", "Keep it friendly", false);
//! while let Some(event) = events.recv().await {
//!     println!("{}", event.kind());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod verdict;

pub use error::{OrchestratorError, Result};
pub use evaluator::BackgroundEvaluator;
pub use orchestrator::{ArticleOrchestrator, MAX_RETRIES};
pub use verdict::{normalize_verdict, parse_verdict};

//! Product documentation lookup for the Copydesk article pipeline.
//!
//! The writer grounds its product mentions in documents retrieved from a
//! vector search index: the request text is embedded once, the index is
//! queried for the nearest documents, and the hits are handed to the
//! orchestrator as constant context for the run.
//!
//! The [`ProductSource`] trait is the seam the orchestrator injects;
//! [`VectorProductSource`] is the live implementation.

pub mod embedding;
pub mod error;
pub mod index;

pub use embedding::{EmbeddingClient, EmbeddingProvider, DEFAULT_EMBEDDING_DIM};
pub use error::{ProductError, Result};
pub use index::{IndexConfig, ProductSource, VectorProductSource};

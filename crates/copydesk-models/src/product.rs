//! Product documentation records.

use serde::{Deserialize, Serialize};

/// A product document retrieved from the documentation index.
///
/// Fetched once per run and treated as constant context for every writer
/// call in that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    /// Index document id.
    pub id: String,

    /// Document title.
    pub title: String,

    /// Document body.
    pub content: String,

    /// Source URL of the document.
    pub url: String,
}

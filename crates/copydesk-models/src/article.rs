//! Request and draft types for article generation.

use serde::{Deserialize, Serialize};

/// A single article-generation request.
///
/// Created once per invocation and never mutated; the same request text and
/// instructions are handed to every iteration of the feedback loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// What the article should be about.
    pub request: String,

    /// Additional guidance from the caller (tone, audience, constraints).
    pub instructions: String,
}

impl GenerationRequest {
    /// Create a new generation request.
    pub fn new(request: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            instructions: instructions.into(),
        }
    }
}

/// An article draft produced by the writer role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// The article text.
    pub article: String,

    /// Writer-authored commentary on the draft.
    ///
    /// This is distinct from editor feedback: it flows forward into the
    /// editor call, never backward into the next iteration.
    pub feedback: String,
}

impl ArticleDraft {
    /// Create a new draft.
    pub fn new(article: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            feedback: feedback.into(),
        }
    }
}

//! Run events emitted by the article orchestrator.

use serde::{Deserialize, Serialize};

use crate::article::ArticleDraft;
use crate::product::ProductDocument;
use crate::research::ResearchBundle;

/// An event in an article-generation run.
///
/// This is the sole output channel of the orchestrator: a finite sequence
/// of events delivered in arrival order, exactly one `Research`, `Draft`,
/// and `Verdict` per iteration and exactly one `Products` per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RunEvent {
    /// Human-readable progress message.
    Message(String),

    /// Findings from a research step.
    Research(ResearchBundle),

    /// Product documents fetched for the run.
    Products(Vec<ProductDocument>),

    /// A draft produced by the writer.
    Draft(ArticleDraft),

    /// The editor's verdict as serialized text.
    ///
    /// Carried as text rather than a parsed record: normalization only
    /// guarantees the payload is syntactically valid JSON, not that it is
    /// a semantically meaningful verdict.
    Verdict(String),
}

impl RunEvent {
    /// Short tag for logging and display.
    pub fn kind(&self) -> &'static str {
        match self {
            RunEvent::Message(_) => "message",
            RunEvent::Research(_) => "researcher",
            RunEvent::Products(_) => "products",
            RunEvent::Draft(_) => "writer",
            RunEvent::Verdict(_) => "editor",
        }
    }
}

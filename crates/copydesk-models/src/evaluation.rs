//! Frozen run snapshot handed to the background evaluator.

use serde::{Deserialize, Serialize};

use crate::article::ArticleDraft;
use crate::product::ProductDocument;
use crate::research::ResearchBundle;

/// Everything the quality evaluators need to score one finished run.
///
/// Captured after the loop exits: the final research bundle, the cached
/// product documents, and the final draft. The evaluator receives its own
/// copy; the orchestrator keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// The original request text.
    pub request: String,

    /// The original caller instructions.
    pub instructions: String,

    /// The final iteration's research bundle.
    pub research: ResearchBundle,

    /// The product documents fetched for the run.
    pub products: Vec<ProductDocument>,

    /// The final article draft.
    pub article: ArticleDraft,
}

impl EvaluationInput {
    /// The query half of the evaluation transcript, as serialized JSON.
    pub fn query_json(&self) -> String {
        serde_json::json!({
            "request": self.request,
            "instructions": self.instructions,
        })
        .to_string()
    }

    /// The context half of the evaluation transcript, as serialized JSON.
    pub fn context_json(&self) -> String {
        serde_json::json!({
            "research": self.research,
            "products": self.products,
        })
        .to_string()
    }

    /// The response half of the evaluation transcript, as serialized JSON.
    pub fn response_json(&self) -> String {
        serde_json::to_string(&self.article).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvaluationInput {
        EvaluationInput {
            request: "camping trends".into(),
            instructions: "keep it short".into(),
            research: ResearchBundle::new(),
            products: Vec::new(),
            article: ArticleDraft::new("The article.", "No Feedback"),
        }
    }

    #[test]
    fn test_query_json_contains_both_halves() {
        let input = sample();
        let query: serde_json::Value = serde_json::from_str(&input.query_json()).unwrap();
        assert_eq!(query["request"], "camping trends");
        assert_eq!(query["instructions"], "keep it short");
    }

    #[test]
    fn test_context_json_shape() {
        let input = sample();
        let context: serde_json::Value = serde_json::from_str(&input.context_json()).unwrap();
        assert!(context.get("research").is_some());
        assert!(context.get("products").is_some());
    }
}

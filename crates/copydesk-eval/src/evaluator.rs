//! LLM-judged article evaluation.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use copydesk_agents::{ChatClient, ChatMessage, ModelConfig};
use copydesk_models::EvaluationInput;
use copydesk_orchestrator::BackgroundEvaluator;

use crate::error::{EvalError, Result};
use crate::score::{parse_score, Criterion, ScoreSet};

/// Scores articles against the four quality criteria.
///
/// Criteria are judged sequentially; a criterion whose judge reply cannot
/// be scored is logged and left out of the set rather than failing the
/// whole evaluation.
pub struct ArticleEvaluator {
    chat: ChatClient,
    config: ModelConfig,
}

impl ArticleEvaluator {
    /// Create an evaluator over the given client.
    pub fn new(chat: ChatClient, config: ModelConfig) -> Self {
        Self { chat, config }
    }

    /// Create an evaluator from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ChatClient::from_env()?, ModelConfig::from_env()?))
    }

    /// Evaluate one finished run.
    pub async fn evaluate(&self, input: &EvaluationInput) -> ScoreSet {
        let query = input.query_json();
        let context = input.context_json();
        let response = input.response_json();

        let mut scores = ScoreSet::new();
        for criterion in Criterion::ALL {
            match self.judge(criterion, &query, &context, &response).await {
                Ok(score) => scores.set(criterion, score),
                Err(e) => warn!(%criterion, "criterion skipped: {}", e),
            }
        }
        scores
    }

    async fn judge(
        &self,
        criterion: Criterion,
        query: &str,
        context: &str,
        response: &str,
    ) -> Result<f64> {
        let messages = vec![
            ChatMessage::system(criterion.instruction()),
            ChatMessage::user(format!(
                "Query:\n{}\n\nContext:\n{}\n\nResponse:\n{}",
                query, context, response
            )),
        ];

        let reply = self.chat.chat(&self.config, messages, None).await?;
        let content = reply.content().unwrap_or_default();
        parse_score(content).ok_or_else(|| EvalError::Unscored(content.to_string()))
    }
}

/// Background evaluator that scores runs on a detached task.
///
/// Dispatch returns immediately; the task runs the evaluator inside a
/// `run_evaluators` span, records the resulting scores on it, and swallows
/// every failure. No handle is kept, so nothing can be joined or awaited.
pub struct SpawnedEvaluator {
    evaluator: Arc<ArticleEvaluator>,
}

impl SpawnedEvaluator {
    /// Create a background evaluator around an article evaluator.
    pub fn new(evaluator: ArticleEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }
}

impl BackgroundEvaluator for SpawnedEvaluator {
    fn dispatch(&self, input: EvaluationInput) {
        let evaluator = Arc::clone(&self.evaluator);
        let run_id = Uuid::new_v4();
        let span = info_span!("run_evaluators", run_id = %run_id, request = %input.request);

        tokio::spawn(
            async move {
                info!("starting offline evaluation");
                let scores = evaluator.evaluate(&input).await;
                match serde_json::to_string(&scores) {
                    Ok(json) => info!(scores = %json, "offline evaluation finished"),
                    Err(e) => warn!("failed to serialize scores: {}", e),
                }
            }
            .instrument(span),
        );
    }
}

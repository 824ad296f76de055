//! The article orchestrator: a linear pipeline with a bounded feedback loop.
//!
//! One run drives research, product lookup, writing, and editing in strict
//! sequence, then loops back through research and writing while the editor
//! verdict keeps the loop alive, up to the retry budget. Progress is
//! delivered as [`RunEvent`]s over a bounded channel: the producer suspends
//! until the consumer pulls, so a run never speculates ahead of its caller.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use copydesk_agents::{Editor, Researcher, Writer};
use copydesk_models::{EvaluationInput, RunEvent, NO_FEEDBACK};
use copydesk_products::ProductSource;

use crate::error::{OrchestratorError, Result};
use crate::evaluator::BackgroundEvaluator;
use crate::verdict::{normalize_verdict, parse_verdict};

/// Additional research-write-edit iterations allowed after the first
/// editor verdict.
pub const MAX_RETRIES: u32 = 2;

/// Bounded channel capacity; capacity 1 keeps the run pull-driven.
const CHANNEL_CAPACITY: usize = 1;

/// Coordinates the generation roles to produce one article per run.
///
/// The collaborators are injected capability objects; the orchestrator has
/// no knowledge of endpoints, keys, or prompts. All state for a run lives
/// on the driving task's stack: the only values carried across iterations
/// are the cached product documents and the feedback extracted from the
/// last verdict.
#[derive(Clone)]
pub struct ArticleOrchestrator {
    researcher: Arc<dyn Researcher>,
    products: Arc<dyn ProductSource>,
    writer: Arc<dyn Writer>,
    editor: Arc<dyn Editor>,
    evaluator: Option<Arc<dyn BackgroundEvaluator>>,
}

impl ArticleOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        researcher: Arc<dyn Researcher>,
        products: Arc<dyn ProductSource>,
        writer: Arc<dyn Writer>,
        editor: Arc<dyn Editor>,
    ) -> Self {
        Self {
            researcher,
            products,
            writer,
            editor,
            evaluator: None,
        }
    }

    /// Attach a background evaluator.
    ///
    /// Without one, runs with `evaluate = true` simply skip the dispatch.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn BackgroundEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Start an article run and return its event stream.
    ///
    /// Events arrive in pipeline order; the sequence is finite and cannot
    /// be restarted. Dropping the receiver stops the run at its next
    /// emission.
    pub fn run(
        &self,
        request: impl Into<String>,
        instructions: impl Into<String>,
        evaluate: bool,
    ) -> mpsc::Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let orchestrator = self.clone();
        let request = request.into();
        let instructions = instructions.into();

        tokio::spawn(async move {
            match orchestrator.drive(&tx, &request, &instructions, evaluate).await {
                Ok(()) => {}
                Err(OrchestratorError::ChannelClosed) => {
                    debug!("event consumer dropped, run stopped")
                }
                Err(e) => error!("article run failed: {}", e),
            }
        });

        rx
    }

    /// The pipeline itself. Steps are strictly sequential; each emission
    /// suspends until the consumer pulls it.
    async fn drive(
        &self,
        tx: &mpsc::Sender<RunEvent>,
        request: &str,
        instructions: &str,
        evaluate: bool,
    ) -> Result<()> {
        info!(request, instructions, "article generation started");

        send(tx, RunEvent::Message("Starting research agent task...".into())).await?;
        let mut research = self
            .researcher
            .research(request, instructions, NO_FEEDBACK)
            .await?;
        send(tx, RunEvent::Research(research.clone())).await?;

        // Fetched once; reused by every writer call in the run.
        let products = self.products.lookup(request).await?;
        send(tx, RunEvent::Products(products.clone())).await?;

        send(tx, RunEvent::Message("Starting writer agent task...".into())).await?;
        let mut draft = self
            .writer
            .write(request, NO_FEEDBACK, instructions, &research, &products)
            .await?;
        send(tx, RunEvent::Draft(draft.clone())).await?;

        send(tx, RunEvent::Message("Starting editor agent task...".into())).await?;
        let raw = self.editor.edit(&draft.article, &draft.feedback).await?;
        let verdict_text = normalize_verdict(&raw);
        send(tx, RunEvent::Verdict(verdict_text.clone())).await?;

        let mut retry_count: u32 = 0;

        // First verdict parse failing is fatal to the run: the stream ends
        // here with no further events. A mid-loop failure below only breaks
        // the loop. The two paths are intentionally different.
        let mut verdict = match parse_verdict(&verdict_text) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("failed to parse editor verdict: {}", e);
                return Ok(());
            }
        };

        // The loop continues while the decision starts with "accept".
        while verdict.decision_accepts() {
            send(
                tx,
                RunEvent::Message(format!("Sending editor feedback ({})...", retry_count + 1)),
            )
            .await?;
            info!(attempt = retry_count + 1, "regenerating from editor feedback");

            research = self
                .researcher
                .research(request, instructions, &verdict.research_feedback)
                .await?;
            send(tx, RunEvent::Research(research.clone())).await?;

            draft = self
                .writer
                .write(
                    request,
                    &verdict.editor_feedback,
                    instructions,
                    &research,
                    &products,
                )
                .await?;
            send(tx, RunEvent::Draft(draft.clone())).await?;

            let raw = self.editor.edit(&draft.article, &draft.feedback).await?;
            let verdict_text = normalize_verdict(&raw);
            verdict = match parse_verdict(&verdict_text) {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!("failed to parse editor verdict during loop: {}", e);
                    break;
                }
            };
            send(tx, RunEvent::Verdict(verdict_text)).await?;

            retry_count += 1;
            if retry_count >= MAX_RETRIES {
                break;
            }
        }

        info!(iterations = retry_count, "editor loop finished");
        send(tx, RunEvent::Message("Editor accepted article".into())).await?;

        if evaluate {
            if let Some(evaluator) = &self.evaluator {
                evaluator.dispatch(EvaluationInput {
                    request: request.to_string(),
                    instructions: instructions.to_string(),
                    research,
                    products,
                    article: draft,
                });
            }
        }

        Ok(())
    }
}

async fn send(tx: &mpsc::Sender<RunEvent>, event: RunEvent) -> Result<()> {
    tx.send(event)
        .await
        .map_err(|_| OrchestratorError::ChannelClosed)
}

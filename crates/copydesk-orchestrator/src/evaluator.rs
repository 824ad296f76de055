//! Background evaluation seam.

use copydesk_models::EvaluationInput;

/// Fire-and-forget quality evaluation of a finished run.
///
/// The orchestrator calls [`dispatch`](BackgroundEvaluator::dispatch) at
/// most once per run, after the final article, and never observes the
/// outcome. Implementations must not block the caller and must swallow
/// their own failures; nothing an evaluator does may reach the event
/// stream.
pub trait BackgroundEvaluator: Send + Sync {
    /// Hand off a frozen run snapshot for scoring.
    fn dispatch(&self, input: EvaluationInput);
}

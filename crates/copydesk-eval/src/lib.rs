//! Article quality evaluation for Copydesk.
//!
//! Two entry points:
//!
//! - [`SpawnedEvaluator`] implements the orchestrator's background
//!   evaluation seam: finished runs are scored on a detached task, results
//!   land in the tracing output, and nothing is ever reported back.
//! - [`batch`] drives the orchestrator over a JSONL file of requests and
//!   aggregates scores offline.
//!
//! Articles are judged against four criteria (relevance, fluency,
//! coherence, groundedness) on a 1-5 scale by a chat model.

pub mod batch;
pub mod error;
pub mod evaluator;
pub mod score;

pub use batch::{evaluate_file, RowResult};
pub use error::{EvalError, Result};
pub use evaluator::{ArticleEvaluator, SpawnedEvaluator};
pub use score::{Criterion, ScoreSet};

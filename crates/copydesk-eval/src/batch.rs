//! Offline batch evaluation over JSONL request files.
//!
//! Each input row is one request/instructions pair. The orchestrator is
//! driven to completion for every row, the final snapshot is scored, and
//! the per-row results are written back out as JSONL alongside averaged
//! scores.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use copydesk_models::{EvaluationInput, GenerationRequest, RunEvent};
use copydesk_orchestrator::ArticleOrchestrator;

use crate::error::Result;
use crate::evaluator::ArticleEvaluator;
use crate::score::ScoreSet;

/// Scored result for one row.
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    /// The row's request text.
    pub request: String,

    /// Scores for the generated article.
    #[serde(flatten)]
    pub scores: ScoreSet,
}

/// A unique identifier for one batch run.
pub fn run_id() -> String {
    format!("{}_article_evaluation", Utc::now().format("%Y%m%d%H%M%S"))
}

/// Read evaluation rows from a JSONL file.
///
/// Each line is one serialized [`GenerationRequest`].
pub fn read_rows(path: &Path) -> Result<Vec<GenerationRequest>> {
    let data = fs::read_to_string(path)?;
    data.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

/// Write row results to a JSONL file.
pub fn write_results(path: &Path, results: &[RowResult]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    for result in results {
        let line = serde_json::to_string(result)?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Drive one orchestrator run and capture its final snapshot.
///
/// Mirrors how the event stream is meant to be consumed: the last research
/// bundle, the product set, and the last draft win. Returns `None` when the
/// run ended before producing all three (an aborted run).
pub async fn run_for_snapshot(
    orchestrator: &ArticleOrchestrator,
    row: &GenerationRequest,
) -> Option<EvaluationInput> {
    let mut events = orchestrator.run(&row.request, &row.instructions, false);

    let mut research = None;
    let mut products = None;
    let mut draft = None;
    while let Some(event) = events.recv().await {
        match event {
            RunEvent::Research(bundle) => research = Some(bundle),
            RunEvent::Products(docs) => products = Some(docs),
            RunEvent::Draft(d) => draft = Some(d),
            RunEvent::Message(_) | RunEvent::Verdict(_) => {}
        }
    }

    Some(EvaluationInput {
        request: row.request.clone(),
        instructions: row.instructions.clone(),
        research: research?,
        products: products?,
        article: draft?,
    })
}

/// Evaluate every row in a batch.
///
/// Rows run concurrently; a row whose run aborts before producing an
/// article is skipped with a warning.
pub async fn evaluate_rows(
    orchestrator: &ArticleOrchestrator,
    evaluator: &ArticleEvaluator,
    rows: &[GenerationRequest],
) -> Vec<RowResult> {
    let futures = rows.iter().map(|row| async move {
        info!(request = %row.request, "evaluating row");
        let Some(snapshot) = run_for_snapshot(orchestrator, row).await else {
            warn!(request = %row.request, "run produced no article, row skipped");
            return None;
        };
        let scores = evaluator.evaluate(&snapshot).await;
        Some(RowResult {
            request: row.request.clone(),
            scores,
        })
    });

    futures::future::join_all(futures)
        .await
        .into_iter()
        .flatten()
        .collect()
}

/// Evaluate a JSONL file end to end.
///
/// Returns the per-row results and the per-criterion averages; results are
/// also written to `output` when given.
pub async fn evaluate_file(
    orchestrator: &ArticleOrchestrator,
    evaluator: &ArticleEvaluator,
    data: &Path,
    output: Option<&Path>,
) -> Result<(Vec<RowResult>, ScoreSet)> {
    let rows = read_rows(data)?;
    info!(rows = rows.len(), run_id = %run_id(), "starting batch evaluation");

    let results = evaluate_rows(orchestrator, evaluator, &rows).await;
    let averages = ScoreSet::averages(
        &results.iter().map(|r| r.scores.clone()).collect::<Vec<_>>(),
    );

    if let Some(path) = output {
        write_results(path, &results)?;
        info!(path = %path.display(), "evaluation results written");
    }

    Ok((results, averages))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;

    use copydesk_agents::{Editor, Researcher, Writer};
    use copydesk_models::{ArticleDraft, ProductDocument, ResearchBundle};
    use copydesk_products::ProductSource;

    struct StubResearcher;

    #[async_trait]
    impl Researcher for StubResearcher {
        async fn research(
            &self,
            _request: &str,
            _instructions: &str,
            _feedback: &str,
        ) -> copydesk_agents::Result<ResearchBundle> {
            Ok(ResearchBundle::new())
        }
    }

    struct StubProducts;

    #[async_trait]
    impl ProductSource for StubProducts {
        async fn lookup(
            &self,
            _request: &str,
        ) -> copydesk_products::Result<Vec<ProductDocument>> {
            Ok(Vec::new())
        }
    }

    struct StubWriter;

    #[async_trait]
    impl Writer for StubWriter {
        async fn write(
            &self,
            _request: &str,
            _feedback: &str,
            _instructions: &str,
            _research: &ResearchBundle,
            _products: &[ProductDocument],
        ) -> copydesk_agents::Result<ArticleDraft> {
            Ok(ArticleDraft::new("The article.", "No Feedback"))
        }
    }

    /// Editor whose reply is fixed for the whole run.
    struct FixedEditor(&'static str);

    #[async_trait]
    impl Editor for FixedEditor {
        async fn edit(&self, _article: &str, _feedback: &str) -> copydesk_agents::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn stub_orchestrator(editor_reply: &'static str) -> ArticleOrchestrator {
        ArticleOrchestrator::new(
            Arc::new(StubResearcher),
            Arc::new(StubProducts),
            Arc::new(StubWriter),
            Arc::new(FixedEditor(editor_reply)),
        )
    }

    #[test]
    fn test_read_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval_inputs.jsonl");
        fs::write(
            &path,
            "{\"request\": \"camping trends\", \"instructions\": \"be brief\"}\n\n\
             {\"request\": \"hiking gear\", \"instructions\": \"focus on safety\"}\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].request, "camping trends");
        assert_eq!(rows[1].instructions, "focus on safety");
    }

    #[test]
    fn test_read_rows_rejects_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        fs::write(&path, "{\"request\": \"a\", \"instructions\": \"b\"}\nnot json\n").unwrap();
        assert!(read_rows(&path).is_err());
    }

    #[test]
    fn test_write_results_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval_results.jsonl");

        let mut scores = ScoreSet::new();
        scores.set(crate::score::Criterion::Relevance, 4.0);
        let results = vec![RowResult {
            request: "camping trends".into(),
            scores,
        }];

        write_results(&path, &results).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(line["request"], "camping trends");
        assert_eq!(line["gpt_relevance"], 4.0);
    }

    #[tokio::test]
    async fn test_run_for_snapshot_captures_final_state() {
        let orchestrator = stub_orchestrator(r#"{"decision": "reject feedback"}"#);
        let row = GenerationRequest::new("camping trends", "be brief");

        let snapshot = run_for_snapshot(&orchestrator, &row).await.unwrap();
        assert_eq!(snapshot.request, "camping trends");
        assert_eq!(snapshot.article.article, "The article.");
    }

    #[tokio::test]
    async fn test_run_for_snapshot_aborted_run_yields_none() {
        // A first verdict that is valid JSON but not a verdict aborts the
        // run before the closing message; the snapshot is still complete
        // because research, products, and draft were all emitted first.
        // Only a run that dies earlier loses the snapshot.
        let orchestrator = stub_orchestrator("[1, 2, 3]");
        let row = GenerationRequest::new("camping trends", "be brief");

        let snapshot = run_for_snapshot(&orchestrator, &row).await;
        assert!(snapshot.is_some());
    }

    #[test]
    fn test_run_id_shape() {
        let id = run_id();
        assert!(id.ends_with("_article_evaluation"));
        assert_eq!(id.split('_').next().unwrap().len(), 14);
    }
}

//! Command handlers for CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use copydesk_agents::{
    ChatClient, LlmEditor, LlmWriter, ModelConfig, SearchClient, SearchResearcher,
};
use copydesk_eval::{evaluate_file, ArticleEvaluator, SpawnedEvaluator};
use copydesk_models::RunEvent;
use copydesk_orchestrator::ArticleOrchestrator;
use copydesk_products::VectorProductSource;

use crate::cli::Commands;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Token budget for the researcher role.
const RESEARCHER_MAX_TOKENS: u32 = 512;

/// Execute a CLI command.
pub async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Write {
            request,
            instructions,
            evaluate,
        } => cmd_write(&request, &instructions, evaluate).await,
        Commands::Eval { data, output } => cmd_eval(&data, output.as_deref()).await,
    }
}

/// Build the orchestrator over live, environment-configured collaborators.
fn build_orchestrator() -> Result<ArticleOrchestrator> {
    let chat = ChatClient::from_env()?;
    let config = ModelConfig::from_env()?;

    let researcher = SearchResearcher::new(
        chat.clone(),
        SearchClient::from_env()?,
        config.clone().with_max_tokens(RESEARCHER_MAX_TOKENS),
    );
    let products = VectorProductSource::from_env()?;
    let writer = LlmWriter::new(chat.clone(), config.clone());
    let editor = LlmEditor::new(chat.clone(), config.clone());
    let evaluator = SpawnedEvaluator::new(ArticleEvaluator::new(chat, config));

    Ok(ArticleOrchestrator::new(
        Arc::new(researcher),
        Arc::new(products),
        Arc::new(writer),
        Arc::new(editor),
    )
    .with_evaluator(Arc::new(evaluator)))
}

async fn cmd_write(request: &str, instructions: &str, evaluate: bool) -> Result<()> {
    info!(request, instructions, evaluate, "starting article run");
    let orchestrator = build_orchestrator()?;

    let mut events = orchestrator.run(request, instructions, evaluate);
    while let Some(event) = events.recv().await {
        print_event(&event)?;
    }

    Ok(())
}

fn print_event(event: &RunEvent) -> Result<()> {
    match event {
        RunEvent::Message(message) => println!("{}", message),
        RunEvent::Research(bundle) => {
            println!("research findings:");
            println!("{}", serde_json::to_string_pretty(bundle)?);
        }
        RunEvent::Products(docs) => {
            println!("product documentation ({} documents):", docs.len());
            println!("{}", serde_json::to_string_pretty(docs)?);
        }
        RunEvent::Draft(draft) => {
            println!("draft article:\n{}\n", draft.article);
            println!("writer notes: {}", draft.feedback);
        }
        RunEvent::Verdict(verdict) => println!("editor verdict: {}", verdict),
    }
    Ok(())
}

async fn cmd_eval(data: &Path, output: Option<&Path>) -> Result<()> {
    let orchestrator = build_orchestrator()?;
    let evaluator = ArticleEvaluator::from_env()?;

    let (results, averages) = evaluate_file(&orchestrator, &evaluator, data, output).await?;

    println!("Evaluated {} rows", results.len());
    for result in &results {
        println!(
            "{}: {}",
            result.request,
            serde_json::to_string(&result.scores)?
        );
    }

    println!("\nAverage scores: {}", serde_json::to_string(&averages)?);
    if let Some(overall) = averages.overall() {
        println!("Overall average: {:.2}", overall);
    }

    Ok(())
}

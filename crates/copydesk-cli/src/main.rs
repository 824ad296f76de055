//! Copydesk CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use copydesk_cli::cli::Cli;
use copydesk_cli::commands;

#[tokio::main]
async fn main() {
    // Load .env if it exists (API keys and endpoints for the collaborators).
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = commands::execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

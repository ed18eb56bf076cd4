//! Main Entrypoint for the Mock Interview CLI
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and command line.
//! 2. Initializing logging on stderr so stdout carries only the conversation.
//! 3. Building the dialogue-service client for the configured provider.
//! 4. Running the interview session and mapping its outcome to an exit code.

use anyhow::Context;
use clap::Parser;
use interview_cli::{
    cli::Cli,
    config::Config,
    session::{report_outcome, run_session},
};
use interview_core::{llm_client::OpenAICompatibleClient, terminal::Terminal};
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::info;

async fn run(config: &Config) -> anyhow::Result<()> {
    let client = OpenAICompatibleClient::new(config.openai_config()?, config.chat_model.clone());
    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    run_session(&client, &mut terminal, config.rounds).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let config = match Config::from_env()
        .and_then(|config| config.apply_cli(&cli))
        .context("Failed to load configuration")
    {
        Ok(config) => config,
        Err(e) => return ExitCode::from(report_outcome(&Err(e), &mut std::io::stderr())),
    };

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        rounds = config.rounds,
        "Configuration loaded. Starting interview..."
    );

    // --- 3. Run the Session ---
    let outcome = run(&config).await;
    ExitCode::from(report_outcome(&outcome, &mut std::io::stderr()))
}

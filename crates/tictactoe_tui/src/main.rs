//! Tic-tac-toe in the terminal.

#![warn(missing_docs)]

mod app;
mod celebration;
mod cli;
mod config;
mod input;
mod names;
mod scheduler;
mod terminal;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;

    // Log to a file; the terminal belongs to the board
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    terminal::run(config).await
}

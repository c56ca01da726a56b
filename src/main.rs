//! Riot match acquisition CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use riftfetch_config::load_runtime_config;
use riftfetch_monitor::setup_logging;
use std::path::Path;

/// Optional dotenv file holding the API token.
const DOTENV_FILE: &str = "config.env";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match dotenvy::from_filename(DOTENV_FILE) {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", DOTENV_FILE)),
    }

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_runtime_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => config.logging.level.as_str(),
    };
    let json = cli.json_logs || config.logging.format == "json";
    let _log_guard = setup_logging(log_level, json, config.logging.file.as_deref().map(Path::new));

    // Execute command
    match cli.command {
        Commands::Fetch(args) => cli::commands::fetch::run(args, &config).await,
        Commands::Ensure(args) => cli::commands::ensure::run(args, &config).await,
        Commands::Cache(args) => cli::commands::cache::run(args, &config).await,
        Commands::ValidateConfig => Ok(()),
    }
}

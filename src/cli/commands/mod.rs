//! CLI command implementations.

pub mod cache;
pub mod ensure;
pub mod fetch;
pub mod validate;

use anyhow::{Context, Result};
use riftfetch_api::{RiotClient, RiotConfig};
use riftfetch_cache::MatchStore;
use riftfetch_config::{AppConfig, RiotSettings};
use riftfetch_monitor::FetchMetrics;
use std::path::PathBuf;
use std::sync::Arc;

/// Build an authenticated client. A missing token fails the whole command.
pub(crate) fn riot_client(
    settings: &RiotSettings,
    metrics: Arc<FetchMetrics>,
) -> Result<RiotClient> {
    let token = std::env::var(&settings.token_env).with_context(|| {
        format!(
            "{} is not set; export it or add it to config.env",
            settings.token_env
        )
    })?;

    let config = RiotConfig::new(token)?
        .with_match_base_url(settings.match_base_url.as_str())
        .with_account_base_url(settings.account_base_url.as_str())
        .with_timeout(settings.timeout());

    RiotClient::new(config, metrics).context("Failed to create Riot API client")
}

/// Cache store for the configured or overridden directory.
pub(crate) fn match_store(config: &AppConfig, dir_override: Option<PathBuf>) -> MatchStore {
    let dir = dir_override.unwrap_or_else(|| PathBuf::from(&config.fetch.matches_dir));
    MatchStore::new(dir).with_validation(config.fetch.validation)
}

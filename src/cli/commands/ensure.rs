//! Ensure command implementation.

use anyhow::{Context, Result};
use riftfetch_config::AppConfig;
use riftfetch_core::IdentityResolver;
use riftfetch_monitor::FetchMetrics;
use riftfetch_pipeline::{ensure_matches_for_player, BatchConfig, BatchProcessor, EnsureRequest};
use std::sync::Arc;
use tracing::warn;

use super::{match_store, riot_client};
use crate::cli::EnsureArgs;

pub async fn run(args: EnsureArgs, config: &AppConfig) -> Result<()> {
    let metrics = Arc::new(FetchMetrics::new());
    let client = Arc::new(riot_client(&config.riot, Arc::clone(&metrics))?);
    let store = Arc::new(match_store(config, args.matches_dir.clone()));
    let processor = BatchProcessor::new(client.clone(), store, metrics);

    let player = client
        .resolve(&args.game_name, &args.tag_line)
        .await
        .context("Failed to resolve Riot ID")?;

    let request = EnsureRequest {
        min_matches: args.min_matches,
        fetch_count: args.fetch_count,
    };
    let batch = BatchConfig {
        include_timeline: config.fetch.include_timeline,
        max_concurrency: config.fetch.max_concurrency,
        ..Default::default()
    };
    let count =
        ensure_matches_for_player(client.as_ref(), &processor, &player.puuid, request, &batch)
            .await
            .context("Failed to top up match cache")?;

    if count < args.min_matches {
        warn!(
            "Only {} matches available for {} (wanted {})",
            count, player, args.min_matches
        );
    }
    println!("{} has {} cached matches", player, count);

    Ok(())
}

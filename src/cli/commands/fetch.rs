//! Fetch command implementation.

use anyhow::{Context, Result};
use riftfetch_config::AppConfig;
use riftfetch_monitor::FetchMetrics;
use riftfetch_pipeline::{fetch_player_matches, BatchConfig, BatchProcessor};
use std::sync::Arc;
use tracing::info;

use super::{match_store, riot_client};
use crate::cli::FetchArgs;

pub async fn run(args: FetchArgs, config: &AppConfig) -> Result<()> {
    info!(
        "Fetching {} matches for {}#{}",
        args.count, args.game_name, args.tag_line
    );

    let metrics = Arc::new(FetchMetrics::new());
    let client = Arc::new(riot_client(&config.riot, Arc::clone(&metrics))?);
    let store = Arc::new(match_store(config, args.matches_dir.clone()));
    let processor = BatchProcessor::new(client.clone(), store, Arc::clone(&metrics));

    let batch = BatchConfig {
        use_cache: config.fetch.use_cache && !args.no_cache,
        include_timeline: args.include_timeline || config.fetch.include_timeline,
        max_concurrency: args.concurrency.unwrap_or(config.fetch.max_concurrency),
    };

    metrics.start_timing();
    let run = fetch_player_matches(
        client.as_ref(),
        client.as_ref(),
        &processor,
        &args.game_name,
        &args.tag_line,
        args.count,
        &batch,
    );
    let outcome = match config.fetch.batch_timeout() {
        Some(limit) => tokio::time::timeout(limit, run)
            .await
            .with_context(|| format!("Batch did not finish within {}s", limit.as_secs())),
        None => Ok(run.await),
    };
    metrics.end_timing();

    let (player, report) = outcome?.context("Failed to fetch matches")?;

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => {
            println!("Player: {}", player);
            println!("{}", report.summary());
        }
    }

    if args.show_metrics {
        println!("{}", metrics.snapshot().summary());
    }

    if let Some(path) = &args.metrics_json {
        metrics
            .export_json(path)
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        info!("Metrics saved to {:?}", path);
    }

    Ok(())
}

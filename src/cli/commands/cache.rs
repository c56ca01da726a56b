//! Cache inspection command.

use anyhow::{Context, Result};
use riftfetch_cache::CacheLookup;
use riftfetch_config::AppConfig;

use super::match_store;
use crate::cli::CacheArgs;

pub async fn run(args: CacheArgs, config: &AppConfig) -> Result<()> {
    let store = match_store(config, args.matches_dir.clone());
    let scan = store
        .scan()
        .await
        .with_context(|| format!("Failed to scan {}", store.dir().display()))?;

    println!("Cache directory: {}", store.dir().display());
    println!("Validation: {:?}", store.validation());
    println!("Valid entries: {}", scan.valid.len());
    println!("Invalid entries: {}", scan.corrupt.len());

    for (match_id, reason) in &scan.corrupt {
        println!("  {}: {}", match_id, reason);
    }

    if args.list {
        println!();
        for match_id in &scan.valid {
            if let CacheLookup::Hit(record) = store.lookup(match_id).await {
                let created = record
                    .created_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let mode = record.info.game_mode.as_deref().unwrap_or("-");
                let timeline = if record.timeline.is_some() { "timeline" } else { "" };
                println!(
                    "  {:<20} {:<16} {:<12} {}",
                    match_id.as_str(),
                    created,
                    mode,
                    timeline
                );
            }
        }
    }

    if let Some(puuid) = &args.puuid {
        let count = store.count_for_player(puuid).await?;
        println!();
        println!("Matches including {}: {}", puuid, count);
    }

    Ok(())
}

//! Player-level flows built on the batch processor.

use riftfetch_core::{IdentityResolver, MatchHistory, PlayerIdentity, RiftResult};
use tracing::info;

use crate::processor::{BatchConfig, BatchProcessor};
use crate::report::BatchReport;

/// How many matches a player should have on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnsureRequest {
    /// Skip fetching when at least this many cached matches include the player.
    pub min_matches: usize,
    /// Number of recent ids to list when topping up.
    pub fetch_count: usize,
}

impl Default for EnsureRequest {
    fn default() -> Self {
        Self {
            min_matches: 1,
            fetch_count: 10,
        }
    }
}

/// Resolve a Riot ID, list its most recent `count` ids and process them.
pub async fn fetch_player_matches<R, H>(
    resolver: &R,
    history: &H,
    processor: &BatchProcessor,
    game_name: &str,
    tag_line: &str,
    count: usize,
    config: &BatchConfig,
) -> RiftResult<(PlayerIdentity, BatchReport)>
where
    R: IdentityResolver + ?Sized,
    H: MatchHistory + ?Sized,
{
    let player = resolver.resolve(game_name, tag_line).await?;
    let match_ids = history.list_match_ids(&player.puuid, count).await?;
    info!("Found {} matches for {}", match_ids.len(), player);

    let report = processor.process_batch(&match_ids, config).await;
    Ok((player, report))
}

/// Make sure at least `request.min_matches` cached matches include `puuid`.
///
/// Returns the number of cached matches for the player afterwards, which may
/// still be below the minimum if upstream has too few or fetches failed.
pub async fn ensure_matches_for_player<H>(
    history: &H,
    processor: &BatchProcessor,
    puuid: &str,
    request: EnsureRequest,
    config: &BatchConfig,
) -> RiftResult<usize>
where
    H: MatchHistory + ?Sized,
{
    let store = processor.store();
    let current = store.count_for_player(puuid).await?;
    if current >= request.min_matches {
        info!("{} cached matches already meet minimum of {}", current, request.min_matches);
        return Ok(current);
    }

    info!(
        "Only {} of {} required matches cached; fetching {} more ids",
        current, request.min_matches, request.fetch_count
    );
    let match_ids = history.list_match_ids(puuid, request.fetch_count).await?;
    let config = BatchConfig {
        use_cache: true,
        ..config.clone()
    };
    processor.process_batch(&match_ids, &config).await;

    Ok(store.count_for_player(puuid).await?)
}

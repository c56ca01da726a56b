//! Bounded-concurrency batch processing.

use futures::FutureExt;
use riftfetch_cache::{CacheLookup, MatchStore};
use riftfetch_core::{MatchId, MatchSource, RiftError};
use riftfetch_monitor::FetchMetrics;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::locks::KeyedLocks;
use crate::report::BatchReport;

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Serve valid cache entries instead of fetching.
    pub use_cache: bool,
    /// Also fetch and embed the timeline.
    pub include_timeline: bool,
    /// Upper bound on simultaneous fetches. Values below 1 are treated as 1.
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            include_timeline: false,
            max_concurrency: 10,
        }
    }
}

impl BatchConfig {
    /// Effective concurrency limit.
    pub fn permits(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

enum Outcome {
    Fetched,
    Cached,
    Failed(String),
}

/// Fetches and caches batches of matches.
///
/// Clones share the same source, store, metrics and per-id locks, so two
/// batches running at once never fetch the same id twice in parallel.
#[derive(Clone)]
pub struct BatchProcessor {
    source: Arc<dyn MatchSource>,
    store: Arc<MatchStore>,
    metrics: Arc<FetchMetrics>,
    locks: Arc<KeyedLocks>,
}

impl BatchProcessor {
    pub fn new(
        source: Arc<dyn MatchSource>,
        store: Arc<MatchStore>,
        metrics: Arc<FetchMetrics>,
    ) -> Self {
        Self {
            source,
            store,
            metrics,
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    pub fn store(&self) -> &Arc<MatchStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<FetchMetrics> {
        &self.metrics
    }

    /// Process every id, at most `config.max_concurrency` at a time.
    ///
    /// A failing id is logged and counted; it never stops its siblings.
    /// Dropping the returned future aborts outstanding work, leaving already
    /// written entries in place.
    pub async fn process_batch(&self, match_ids: &[MatchId], config: &BatchConfig) -> BatchReport {
        info!(
            "Processing {} matches (max concurrency {}, cache {}, timeline {})",
            match_ids.len(),
            config.permits(),
            if config.use_cache { "on" } else { "off" },
            if config.include_timeline { "on" } else { "off" },
        );

        let permits = Arc::new(Semaphore::new(config.permits()));
        let mut tasks = JoinSet::new();

        for match_id in match_ids.iter().cloned() {
            let worker = self.clone();
            let permits = Arc::clone(&permits);
            let config = config.clone();
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(worker.process_one(&match_id, &config, &permits))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| Outcome::Failed("worker panicked".to_string()));
                (match_id, outcome)
            });
        }

        let mut report = BatchReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Outcome::Fetched)) => report.successful += 1,
                Ok((_, Outcome::Cached)) => report.cached += 1,
                Ok((match_id, Outcome::Failed(reason))) => {
                    error!("Failed to process match {}: {}", match_id, reason);
                    report.record_failure(match_id, reason);
                }
                Err(e) => {
                    error!("Match task did not complete: {}", e);
                    report.failed += 1;
                }
            }
        }

        info!("{}", report.summary_line());
        report
    }

    async fn process_one(
        &self,
        match_id: &MatchId,
        config: &BatchConfig,
        permits: &Semaphore,
    ) -> Outcome {
        // Duplicates wait here without holding a permit; the follower then
        // finds the leader's entry in the cache.
        let _key = self.locks.lock(match_id).await;
        let Ok(_permit) = permits.acquire().await else {
            return Outcome::Failed("concurrency limiter closed".to_string());
        };

        if config.use_cache {
            match self.store.lookup(match_id).await {
                CacheLookup::Hit(_) => {
                    self.metrics.record_cache_hit();
                    debug!("Using cached data for {}", match_id);
                    return Outcome::Cached;
                }
                CacheLookup::Missing => self.metrics.record_cache_miss(),
                CacheLookup::Corrupt(reason) => {
                    warn!("Ignoring invalid cache entry for {}: {}", match_id, reason);
                    self.metrics.record_cache_miss();
                }
            }
        }

        let fetched = if config.include_timeline {
            self.source.fetch_match_with_timeline(match_id).await
        } else {
            self.source.fetch_match(match_id).await
        };
        let record = match fetched {
            Ok(record) => record,
            Err(e) => return Outcome::Failed(RiftError::from(e).to_string()),
        };

        match self.store.put(match_id, &record).await {
            Ok(path) => {
                info!("Saved match {} to {}", match_id, path.display());
                Outcome::Fetched
            }
            Err(e) => Outcome::Failed(RiftError::from(e).to_string()),
        }
    }
}

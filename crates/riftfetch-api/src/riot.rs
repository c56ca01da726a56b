//! Riot API client: account lookup, match history and match fetches.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use riftfetch_core::traits::{IdentityResolver, MatchHistory, MatchSource, MAX_PAGE_SIZE};
use riftfetch_core::types::{MatchId, MatchRecord, PlayerIdentity, TimelineRecord};
use riftfetch_core::ApiError;
use riftfetch_monitor::{FetchMetrics, RequestPhase};
use serde_json::Value;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{RiotConfig, DEFAULT_RETRY_AFTER};
use crate::transport::{HttpTransport, ReqwestTransport};

/// How many times a 429 is absorbed before giving up.
#[derive(Debug, Clone, Copy)]
enum RateLimitRetry {
    /// Single fetches: one retry, then `RateLimited`.
    Once,
    /// History paging keeps waiting until upstream lets it through.
    Unbounded,
}

impl RateLimitRetry {
    fn allows(self, retries_so_far: u32) -> bool {
        match self {
            RateLimitRetry::Once => retries_so_far < 1,
            RateLimitRetry::Unbounded => true,
        }
    }
}

/// Riot API client.
pub struct RiotClient {
    config: RiotConfig,
    transport: Arc<dyn HttpTransport>,
    metrics: Arc<FetchMetrics>,
}

impl RiotClient {
    /// Create a client backed by `reqwest`.
    pub fn new(config: RiotConfig, metrics: Arc<FetchMetrics>) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport), metrics))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        config: RiotConfig,
        transport: Arc<dyn HttpTransport>,
        metrics: Arc<FetchMetrics>,
    ) -> Self {
        Self {
            config,
            transport,
            metrics,
        }
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> &Arc<FetchMetrics> {
        &self.metrics
    }

    fn endpoint(&self, base: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(base)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid base url {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidArgument(format!("base url {} cannot take a path", base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET with 429 handling; returns the body of a 2xx response.
    async fn get_with_backoff(
        &self,
        url: &str,
        phase: RequestPhase,
        retry: RateLimitRetry,
    ) -> Result<String, ApiError> {
        let mut retries = 0u32;
        loop {
            let started = Instant::now();
            let result = self.transport.get(url).await;
            self.metrics.record_request(started.elapsed(), phase);
            let response = result?;
            debug!("GET {} -> {}", url, response.status);

            let status = response.status;
            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = response.retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
                if !retry.allows(retries) {
                    return Err(ApiError::RateLimited { retry_after: wait });
                }
                retries += 1;
                warn!(
                    "429 for {}. Sleeping {:.1}s then retrying",
                    url,
                    wait.as_secs_f64()
                );
                self.metrics.record_retry();
                tokio::time::sleep(wait).await;
                continue;
            }
            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound(url.to_string()));
            }
            if !status.is_success() {
                let detail: String = response.body.chars().take(200).collect();
                return Err(ApiError::Transient(format!("{}: {}", status, detail)));
            }
            return Ok(response.body);
        }
    }
}

#[async_trait]
impl IdentityResolver for RiotClient {
    async fn resolve(&self, game_name: &str, tag_line: &str) -> Result<PlayerIdentity, ApiError> {
        if game_name.trim().is_empty() || tag_line.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "game name and tag line are required".into(),
            ));
        }

        let url = self.endpoint(
            &self.config.account_base_url,
            &["by-riot-id", game_name, tag_line],
        )?;
        let body = self
            .get_with_backoff(url.as_str(), RequestPhase::Account, RateLimitRetry::Once)
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => {
                    ApiError::NotFound(format!("player {}#{}", game_name, tag_line))
                }
                other => other,
            })?;

        let identity: PlayerIdentity = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("account response missing required fields: {}", e))
        })?;

        info!(
            "Resolved Riot ID {}#{} -> {} (puuid tail {})",
            game_name,
            tag_line,
            identity,
            identity.puuid_tail()
        );
        Ok(identity)
    }
}

#[async_trait]
impl MatchHistory for RiotClient {
    async fn list_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<MatchId>, ApiError> {
        if count == 0 {
            return Err(ApiError::InvalidArgument("count must be positive".into()));
        }

        let mut ids: Vec<MatchId> = Vec::with_capacity(count.min(1000));
        let mut start = 0usize;

        while ids.len() < count {
            let batch = (count - ids.len()).min(MAX_PAGE_SIZE);
            let mut url = self.endpoint(
                &self.config.match_base_url,
                &["matches", "by-puuid", puuid, "ids"],
            )?;
            url.query_pairs_mut()
                .append_pair("start", &start.to_string())
                .append_pair("count", &batch.to_string());

            let body = self
                .get_with_backoff(url.as_str(), RequestPhase::MatchIds, RateLimitRetry::Unbounded)
                .await?;
            let page: Vec<MatchId> = serde_json::from_str(&body).map_err(|e| {
                ApiError::InvalidResponse(format!("match history was not a list of ids: {}", e))
            })?;

            let received = page.len();
            ids.extend(page);
            debug!("Match history page start={} received {}/{}", start, received, batch);

            if received < batch {
                break;
            }
            start += batch;
        }

        ids.truncate(count);
        info!("Total match IDs fetched: {}", ids.len());
        Ok(ids)
    }
}

#[async_trait]
impl MatchSource for RiotClient {
    async fn fetch_match(&self, match_id: &MatchId) -> Result<MatchRecord, ApiError> {
        let url = self.endpoint(&self.config.match_base_url, &["matches", match_id.as_str()])?;
        let body = self
            .get_with_backoff(url.as_str(), RequestPhase::MatchDetails, RateLimitRetry::Once)
            .await?;

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("match {}: {}", match_id, e)))?;
        if !value.is_object() {
            return Err(ApiError::InvalidResponse(format!(
                "match {} response was not a JSON object",
                match_id
            )));
        }
        MatchRecord::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("match {}: {}", match_id, e)))
    }

    async fn fetch_timeline(&self, match_id: &MatchId) -> Result<Option<TimelineRecord>, ApiError> {
        let url = self.endpoint(
            &self.config.match_base_url,
            &["matches", match_id.as_str(), "timeline"],
        )?;
        let body = match self
            .get_with_backoff(url.as_str(), RequestPhase::Timeline, RateLimitRetry::Once)
            .await
        {
            Ok(body) => body,
            Err(ApiError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::InvalidResponse(format!("timeline {}: {}", match_id, e)))
    }

    fn name(&self) -> &str {
        "Riot match-v5"
    }
}

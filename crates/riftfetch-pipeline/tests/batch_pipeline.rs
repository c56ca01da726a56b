//! End-to-end: resolve a Riot ID, list its history and fetch the batch
//! through the real client over a scripted transport.

use async_trait::async_trait;
use riftfetch_api::{HttpResponse, HttpTransport, RiotClient, RiotConfig};
use riftfetch_cache::MatchStore;
use riftfetch_core::{ApiError, MatchId};
use riftfetch_monitor::FetchMetrics;
use riftfetch_pipeline::{
    ensure_matches_for_player, fetch_player_matches, BatchConfig, BatchProcessor, EnsureRequest,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const PUUID: &str = "puuid-0123456789abcdef";

/// Fake Riot API: ten matches, one of which is gone and one rate limited once.
#[derive(Default)]
struct FakeRiot {
    requests: Mutex<Vec<String>>,
    throttled: Mutex<HashSet<String>>,
}

impl FakeRiot {
    fn count_matching(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl HttpTransport for FakeRiot {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(url.to_string());
        let path = url.split('?').next().unwrap_or(url);

        if path.contains("/by-riot-id/") {
            let body = json!({"puuid": PUUID, "gameName": "Hide on bush", "tagLine": "KR1"});
            return Ok(HttpResponse::ok(body.to_string()));
        }
        if path.ends_with("/ids") {
            let ids: Vec<String> = (0..10).map(|i| format!("EUW1_{}", i)).collect();
            return Ok(HttpResponse::ok(serde_json::to_string(&ids).unwrap()));
        }
        if path.ends_with("/timeline") {
            let body = json!({
                "metadata": {"matchId": "x"},
                "info": {"frameInterval": 60000, "frames": []}
            });
            return Ok(HttpResponse::ok(body.to_string()));
        }

        let id = path.rsplit('/').next().unwrap_or_default().to_string();
        if id == "EUW1_3" {
            return Ok(HttpResponse::status(reqwest::StatusCode::NOT_FOUND));
        }
        if id == "EUW1_5" && self.throttled.lock().unwrap().insert(id.clone()) {
            return Ok(HttpResponse::rate_limited(1));
        }
        let body = json!({
            "metadata": {"matchId": id, "participants": [PUUID]},
            "info": {"gameId": 1, "queueId": 420, "participants": [{"puuid": PUUID, "win": true}]}
        });
        Ok(HttpResponse::ok(body.to_string()))
    }
}

struct Harness {
    fake: Arc<FakeRiot>,
    client: Arc<RiotClient>,
    processor: BatchProcessor,
    metrics: Arc<FetchMetrics>,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let fake = Arc::new(FakeRiot::default());
    let metrics = Arc::new(FetchMetrics::new());
    let config = RiotConfig::new("RGAPI-test")
        .unwrap()
        .with_match_base_url("http://riot.test/lol/match/v5")
        .with_account_base_url("http://riot.test/riot/account/v1/accounts");
    let client = Arc::new(RiotClient::with_transport(
        config,
        fake.clone(),
        Arc::clone(&metrics),
    ));
    let processor = BatchProcessor::new(
        client.clone(),
        Arc::new(MatchStore::new(dir.path().join("matches"))),
        Arc::clone(&metrics),
    );
    Harness {
        fake,
        client,
        processor,
        metrics,
        _dir: dir,
    }
}

#[tokio::test(start_paused = true)]
async fn test_fetch_then_rerun_from_cache() {
    let h = harness();
    let config = BatchConfig {
        max_concurrency: 4,
        ..Default::default()
    };

    h.metrics.start_timing();
    let (player, report) = fetch_player_matches(
        h.client.as_ref(),
        h.client.as_ref(),
        &h.processor,
        "hide on bush",
        "kr1",
        10,
        &config,
    )
    .await
    .unwrap();
    h.metrics.end_timing();

    assert_eq!(player.to_string(), "Hide on bush#KR1");
    assert_eq!(report.successful, 9);
    assert_eq!(report.failed, 1);
    assert_eq!(report.cached, 0);
    assert_eq!(report.failures[0].match_id, MatchId::new("EUW1_3").unwrap());

    let snapshot = h.metrics.snapshot();
    // account + ids + 10 matches + one retried 429
    assert_eq!(snapshot.total_requests, 13);
    assert_eq!(snapshot.retry_count, 1);
    assert_eq!(snapshot.cache_misses, 10);
    assert_eq!(snapshot.phase_breakdown.match_ids_requests, 1);
    assert_eq!(snapshot.phase_breakdown.match_details_requests, 11);
    assert!(snapshot.total_duration_s.is_some());

    let stored = h.processor.store().list_ids().await.unwrap();
    assert_eq!(stored.len(), 9);
    assert!(!stored.contains(&MatchId::new("EUW1_3").unwrap()));

    // Second run: everything already on disk is served locally.
    let before = h.fake.count_matching("/matches/EUW1_");
    let (_, rerun) = fetch_player_matches(
        h.client.as_ref(),
        h.client.as_ref(),
        &h.processor,
        "hide on bush",
        "kr1",
        10,
        &config,
    )
    .await
    .unwrap();
    assert_eq!(rerun.cached, 9);
    assert_eq!(rerun.failed, 1);
    assert_eq!(h.fake.count_matching("/matches/EUW1_"), before + 1);
}

#[tokio::test]
async fn test_timeline_is_embedded() {
    let h = harness();
    let config = BatchConfig {
        include_timeline: true,
        ..Default::default()
    };
    let ids = vec![MatchId::new("EUW1_0").unwrap()];

    let report = h.processor.process_batch(&ids, &config).await;
    assert_eq!(report.successful, 1);

    let record = h.processor.store().get(&ids[0]).await.unwrap();
    let timeline = record.timeline.expect("timeline embedded");
    assert_eq!(timeline.frame_interval(), Some(60000));
    assert_eq!(h.metrics.snapshot().phase_breakdown.timeline_requests, 1);
}

#[tokio::test]
async fn test_ensure_over_real_client() {
    let h = harness();
    let request = EnsureRequest {
        min_matches: 3,
        fetch_count: 4,
    };

    let count = tokio::time::timeout(
        Duration::from_secs(30),
        ensure_matches_for_player(
            h.client.as_ref(),
            &h.processor,
            PUUID,
            request,
            &BatchConfig::default(),
        ),
    )
    .await
    .unwrap()
    .unwrap();

    // EUW1_3 is missing upstream.
    assert_eq!(count, 3);
    assert_eq!(h.fake.count_matching("/by-puuid/"), 1);
}

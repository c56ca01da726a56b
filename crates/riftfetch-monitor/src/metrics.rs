//! Request metrics.
//!
//! One [`FetchMetrics`] is created per process and shared as an `Arc` with every
//! component that talks to the network or the cache. All mutation goes through
//! a mutex, so concurrent fetch tasks can record without coordination.

use riftfetch_core::RiftError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Which pipeline phase issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    /// Match history listing.
    MatchIds,
    /// Single match document.
    MatchDetails,
    /// Match timeline.
    Timeline,
    /// Account lookup. Counted in totals only.
    Account,
}

#[derive(Debug, Default)]
struct MetricsState {
    total_requests: u64,
    cache_hits: u64,
    cache_misses: u64,
    retry_count: u64,
    /// Seconds.
    latencies: Vec<f64>,
    match_ids_requests: u64,
    match_details_requests: u64,
    timeline_requests: u64,
    started: Option<Instant>,
    finished: Option<Instant>,
}

/// Thread-safe fetch metrics collector.
#[derive(Debug, Default)]
pub struct FetchMetrics {
    state: Mutex<MetricsState>,
}

/// Per-phase request counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    pub match_ids_requests: u64,
    pub match_details_requests: u64,
    pub timeline_requests: u64,
}

/// Serializable point-in-time view of [`FetchMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub retry_count: u64,
    pub avg_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub max_latency_ms: f64,
    pub phase_breakdown: PhaseBreakdown,
    pub total_duration_s: Option<f64>,
}

impl FetchMetrics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        // Counters stay meaningful even if a recording thread panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one completed request.
    pub fn record_request(&self, latency: Duration, phase: RequestPhase) {
        let mut state = self.lock();
        state.latencies.push(latency.as_secs_f64());
        state.total_requests += 1;
        match phase {
            RequestPhase::MatchIds => state.match_ids_requests += 1,
            RequestPhase::MatchDetails => state.match_details_requests += 1,
            RequestPhase::Timeline => state.timeline_requests += 1,
            RequestPhase::Account => {}
        }
    }

    pub fn record_cache_hit(&self) {
        self.lock().cache_hits += 1;
    }

    pub fn record_cache_miss(&self) {
        self.lock().cache_misses += 1;
    }

    pub fn record_retry(&self) {
        self.lock().retry_count += 1;
    }

    /// Mark the start of a run.
    pub fn start_timing(&self) {
        self.lock().started = Some(Instant::now());
    }

    /// Mark the end of a run.
    pub fn end_timing(&self) {
        self.lock().finished = Some(Instant::now());
    }

    /// Time between start and end, only when both were marked.
    pub fn total_duration(&self) -> Option<Duration> {
        let state = self.lock();
        match (state.started, state.finished) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    /// Mean latency in seconds, zero without samples.
    pub fn avg_latency(&self) -> f64 {
        let state = self.lock();
        if state.latencies.is_empty() {
            return 0.0;
        }
        state.latencies.iter().sum::<f64>() / state.latencies.len() as f64
    }

    /// Largest latency in seconds, zero without samples.
    pub fn max_latency(&self) -> f64 {
        self.lock().latencies.iter().copied().fold(0.0, f64::max)
    }

    /// 95th percentile latency in seconds.
    pub fn p95_latency(&self) -> f64 {
        p95(&self.lock().latencies)
    }

    /// Clear every counter, sample and timing mark.
    pub fn reset(&self) {
        *self.lock() = MetricsState::default();
    }

    /// Take a serializable snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.lock();
        let latencies = &state.latencies;
        let avg = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().sum::<f64>() / latencies.len() as f64
        };
        let max = latencies.iter().copied().fold(0.0, f64::max);
        let total_duration_s = match (state.started, state.finished) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start).as_secs_f64()),
            _ => None,
        };

        MetricsSnapshot {
            total_requests: state.total_requests,
            cache_hits: state.cache_hits,
            cache_misses: state.cache_misses,
            retry_count: state.retry_count,
            avg_latency_ms: round_ms(avg),
            p95_latency_ms: round_ms(p95(latencies)),
            max_latency_ms: round_ms(max),
            phase_breakdown: PhaseBreakdown {
                match_ids_requests: state.match_ids_requests,
                match_details_requests: state.match_details_requests,
                timeline_requests: state.timeline_requests,
            },
            total_duration_s,
        }
    }

    /// Write the snapshot as pretty JSON.
    pub fn export_json(&self, path: &Path) -> Result<(), RiftError> {
        let json = serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| RiftError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Value at index `floor(0.95 * n)` of the ascending samples, clamped to the last index.
pub fn p95(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut ordered = samples.to_vec();
    ordered.sort_by(f64::total_cmp);
    let idx = ((ordered.len() as f64 * 0.95).floor() as usize).min(ordered.len() - 1);
    ordered[idx]
}

/// Seconds to milliseconds, two decimals.
fn round_ms(seconds: f64) -> f64 {
    (seconds * 1000.0 * 100.0).round() / 100.0
}

impl MetricsSnapshot {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   FETCH METRICS SUMMARY                   \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("REQUESTS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Total requests:      {}\n", self.total_requests));
        s.push_str(&format!("  Cache hits:          {}\n", self.cache_hits));
        s.push_str(&format!("  Cache misses:        {}\n", self.cache_misses));
        s.push_str(&format!("  Retry count:         {}\n", self.retry_count));
        s.push('\n');

        s.push_str("LATENCY\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Avg latency:         {:.2} ms\n", self.avg_latency_ms));
        s.push_str(&format!("  P95 latency:         {:.2} ms\n", self.p95_latency_ms));
        s.push_str(&format!("  Max latency:         {:.2} ms\n", self.max_latency_ms));
        s.push('\n');

        s.push_str("PHASE BREAKDOWN\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Match id requests:   {}\n",
            self.phase_breakdown.match_ids_requests
        ));
        s.push_str(&format!(
            "  Match requests:      {}\n",
            self.phase_breakdown.match_details_requests
        ));
        s.push_str(&format!(
            "  Timeline requests:   {}\n",
            self.phase_breakdown.timeline_requests
        ));
        s.push('\n');

        match self.total_duration_s {
            Some(secs) => s.push_str(&format!("  Total duration:      {:.2} s\n", secs)),
            None => s.push_str("  Total duration:      n/a\n"),
        }

        s
    }
}

//! Fetch metrics and logging.

mod logging;
mod metrics;

pub use logging::setup_logging;
pub use metrics::{p95, FetchMetrics, MetricsSnapshot, PhaseBreakdown, RequestPhase};

//! Match batch processing.

mod ensure;
mod locks;
mod processor;
mod report;

pub use ensure::{ensure_matches_for_player, fetch_player_matches, EnsureRequest};
pub use locks::{KeyGuard, KeyedLocks};
pub use processor::{BatchConfig, BatchProcessor};
pub use report::{BatchReport, FailedMatch};

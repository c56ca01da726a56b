//! Match fetching trait.

use crate::error::ApiError;
use crate::types::{MatchId, MatchRecord, TimelineRecord};
use async_trait::async_trait;
use tracing::{info, warn};

/// Retrieves match payloads.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Fetch one match document.
    async fn fetch_match(&self, match_id: &MatchId) -> Result<MatchRecord, ApiError>;

    /// Fetch the timeline of a match.
    ///
    /// # Returns
    /// `None` when upstream has no timeline for the match (404)
    async fn fetch_timeline(&self, match_id: &MatchId) -> Result<Option<TimelineRecord>, ApiError>;

    /// Fetch a match and, concurrently, its timeline.
    ///
    /// The timeline is best effort: any failure is logged and the match is
    /// returned without it. Only the match fetch can fail this call.
    async fn fetch_match_with_timeline(&self, match_id: &MatchId) -> Result<MatchRecord, ApiError> {
        let (record, timeline) =
            tokio::join!(self.fetch_match(match_id), self.fetch_timeline(match_id));
        let record = record?;

        match timeline {
            Ok(Some(timeline)) => Ok(record.with_timeline(timeline)),
            Ok(None) => {
                info!("Timeline not found for {}", match_id);
                Ok(record)
            }
            Err(e) => {
                warn!("Timeline fetch failed for {}: {}", match_id, e);
                Ok(record)
            }
        }
    }

    /// Source name for logs.
    fn name(&self) -> &str;
}

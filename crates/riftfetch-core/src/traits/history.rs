//! Match history trait.

use crate::error::ApiError;
use crate::types::MatchId;
use async_trait::async_trait;

/// Largest page the match history endpoint will serve.
pub const MAX_PAGE_SIZE: usize = 100;

/// Lists match ids for a player.
#[async_trait]
pub trait MatchHistory: Send + Sync {
    /// List up to `count` match ids, in upstream order (most recent first).
    ///
    /// Implementations page in chunks of at most [`MAX_PAGE_SIZE`] and stop
    /// early when a page comes back short.
    ///
    /// # Errors
    /// * `ApiError::InvalidArgument` if `count` is zero; no request is made
    async fn list_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<MatchId>, ApiError>;
}

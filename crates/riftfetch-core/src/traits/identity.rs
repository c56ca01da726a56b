//! Identity resolution trait.

use crate::error::ApiError;
use crate::types::PlayerIdentity;
use async_trait::async_trait;

/// Maps a Riot id (`game_name#tag_line`) to a player identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve an account.
    ///
    /// # Errors
    /// * `ApiError::NotFound` if upstream has no such account
    /// * `ApiError::Transient` for any other transport or HTTP failure
    async fn resolve(&self, game_name: &str, tag_line: &str) -> Result<PlayerIdentity, ApiError>;

    /// Resolve an account and return only its puuid.
    async fn resolve_puuid(&self, game_name: &str, tag_line: &str) -> Result<String, ApiError> {
        Ok(self.resolve(game_name, tag_line).await?.puuid)
    }
}

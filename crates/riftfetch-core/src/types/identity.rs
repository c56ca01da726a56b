//! Player identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved Riot account.
///
/// `game_name` and `tag_line` carry the upstream canonical casing, which may
/// differ from what the caller typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    #[serde(rename = "gameName")]
    pub game_name: String,
    #[serde(rename = "tagLine")]
    pub tag_line: String,
    pub puuid: String,
}

impl PlayerIdentity {
    /// Create a new identity.
    pub fn new(
        game_name: impl Into<String>,
        tag_line: impl Into<String>,
        puuid: impl Into<String>,
    ) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
            puuid: puuid.into(),
        }
    }

    /// Last six characters of the puuid, safe to put in logs.
    pub fn puuid_tail(&self) -> &str {
        let start = self
            .puuid
            .char_indices()
            .rev()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.puuid[start..]
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

//! Match identifiers.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque match identifier, e.g. `EUW1_6185572887`.
///
/// Ids double as cache file names, so construction rejects anything that
/// could escape the cache directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
    /// Create a validated match id.
    pub fn new(id: impl Into<String>) -> Result<Self, ApiError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ApiError::InvalidArgument("match id is empty".into()));
        }
        if id.contains(['/', '\\']) || id.contains("..") || id.contains('\0') {
            return Err(ApiError::InvalidArgument(format!(
                "match id {:?} contains path characters",
                id
            )));
        }
        Ok(Self(id))
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache file name for this id.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatchId {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_validation() {
        assert!(MatchId::new("EUW1_6185572887").is_ok());
        assert!(MatchId::new("").is_err());
        assert!(MatchId::new("   ").is_err());
        assert!(MatchId::new("../etc/passwd").is_err());
        assert!(MatchId::new("a/b").is_err());
        assert!(MatchId::new("a\\b").is_err());
    }

    #[test]
    fn test_file_name() {
        let id = MatchId::new("EUW1_1").unwrap();
        assert_eq!(id.file_name(), "EUW1_1.json");
        assert_eq!(id.to_string(), "EUW1_1");
    }

    #[test]
    fn test_deserialize_rejects_bad_ids() {
        let ids: Vec<MatchId> = serde_json::from_str(r#"["EUW1_1","EUW1_2"]"#).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(serde_json::from_str::<Vec<MatchId>>(r#"["../x"]"#).is_err());
    }
}

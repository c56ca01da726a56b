//! Match payload types.
//!
//! Only the fields the pipeline inspects are modelled. Everything else in the
//! upstream document is kept in the flattened `extra` maps so a record read
//! from the API and written to disk is not truncated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::timeline::TimelineRecord;

/// A full match document, optionally carrying its timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `metadata` block of a match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(rename = "matchId", default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    /// Participant puuids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `info` block of a match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchInfo {
    #[serde(rename = "gameId", default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i64>,
    #[serde(rename = "gameMode", default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    #[serde(rename = "queueId", default, skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
    /// Unix milliseconds.
    #[serde(rename = "gameCreation", default, skip_serializing_if = "Option::is_none")]
    pub game_creation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One player's entry in `info.participants`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puuid: Option<String>,
    #[serde(rename = "teamId", default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(rename = "championName", default, skip_serializing_if = "Option::is_none")]
    pub champion_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One side's entry in `info.teams`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamId", default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<bool>,
    /// Objective counters keyed by objective name (`baron`, `dragon`, `riftHerald`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<BTreeMap<String, Objective>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Objective counter for a team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Objective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kills: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MatchRecord {
    /// The `metadata.matchId` value, if present.
    pub fn match_id(&self) -> Option<&str> {
        self.metadata.match_id.as_deref()
    }

    /// The `info.gameId` value, if present.
    pub fn game_id(&self) -> Option<i64> {
        self.info.game_id
    }

    /// Attach a timeline, replacing any existing one.
    pub fn with_timeline(mut self, timeline: TimelineRecord) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Whether the given puuid took part in this match.
    pub fn has_participant(&self, puuid: &str) -> bool {
        self.info
            .participants()
            .iter()
            .any(|p| p.puuid.as_deref() == Some(puuid))
            || self.metadata.participants().iter().any(|p| p == puuid)
    }

    /// Game creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.info
            .game_creation
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Parse a record out of a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl MatchMetadata {
    /// Participant puuids, empty when absent.
    pub fn participants(&self) -> &[String] {
        self.participants.as_deref().unwrap_or(&[])
    }
}

impl MatchInfo {
    /// Participants, empty when absent.
    pub fn participants(&self) -> &[Participant] {
        self.participants.as_deref().unwrap_or(&[])
    }

    /// Teams, empty when absent.
    pub fn teams(&self) -> &[Team] {
        self.teams.as_deref().unwrap_or(&[])
    }
}

impl Team {
    /// Kill count for a named objective, zero when absent.
    pub fn objective_kills(&self, name: &str) -> i64 {
        self.objectives
            .as_ref()
            .and_then(|objectives| objectives.get(name))
            .and_then(|o| o.kills)
            .unwrap_or(0)
    }
}

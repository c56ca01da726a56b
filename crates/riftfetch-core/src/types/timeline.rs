//! Match timeline types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Time-bucketed event frames for one match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TimelineMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<TimelineInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineMetadata {
    #[serde(rename = "matchId", default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineInfo {
    /// Milliseconds between frames.
    #[serde(rename = "frameInterval", default, skip_serializing_if = "Option::is_none")]
    pub frame_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<TimelineFrame>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One frame: a timestamp plus the raw events that happened in it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimelineRecord {
    /// Frames, empty when absent.
    pub fn frames(&self) -> &[TimelineFrame] {
        self.info
            .as_ref()
            .and_then(|info| info.frames.as_deref())
            .unwrap_or(&[])
    }

    /// Milliseconds between frames, if sent.
    pub fn frame_interval(&self) -> Option<i64> {
        self.info.as_ref().and_then(|info| info.frame_interval)
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    /// Events of the given `type` across all frames.
    pub fn events_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.frames()
            .iter()
            .flat_map(|f| f.events.as_deref().unwrap_or(&[]))
            .filter(move |e| e.get("type").and_then(Value::as_str) == Some(kind))
    }
}

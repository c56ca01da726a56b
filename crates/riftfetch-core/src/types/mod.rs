//! Core data types.

mod identity;
mod match_id;
mod match_record;
mod timeline;

pub use identity::PlayerIdentity;
pub use match_id::MatchId;
pub use match_record::{MatchInfo, MatchMetadata, MatchRecord, Objective, Participant, Team};
pub use timeline::{TimelineFrame, TimelineInfo, TimelineMetadata, TimelineRecord};

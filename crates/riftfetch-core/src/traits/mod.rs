//! Capability traits implemented by API clients and test doubles.

mod identity;
mod history;
mod match_source;

pub use history::{MatchHistory, MAX_PAGE_SIZE};
pub use identity::IdentityResolver;
pub use match_source::MatchSource;

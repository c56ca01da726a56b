//! On-disk match cache.
//!
//! One pretty-printed JSON file per match id under a caller-supplied
//! directory. Reads validate structure before handing a record back; a file
//! that fails validation is reported the same way as a missing one.

mod store;
mod validate;

pub use store::{CacheLookup, CacheScan, MatchStore};
pub use validate::{validate_payload, ValidationMode};

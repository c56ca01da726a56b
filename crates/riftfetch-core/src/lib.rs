//! Core types and traits for the match acquisition pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Player identity and match id types
//! - Structured match and timeline records with pass-through of unknown fields
//! - The error taxonomy shared by every pipeline stage
//! - Capability traits for identity resolution, history listing and match fetching

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ApiError, CacheError, RiftError, RiftResult};
pub use types::*;
pub use traits::*;

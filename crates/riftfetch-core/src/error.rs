//! Error types for the match acquisition pipeline.

use std::time::Duration;
use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum RiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while talking to the remote match API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Bad caller input. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Upstream answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered 429 and the local retry budget is spent.
    #[error("Rate limited: retry after {}s", retry_after.as_secs_f64())]
    RateLimited { retry_after: Duration },

    /// Timeouts, connection failures, 5xx and any other non-success status.
    #[error("Transient network error: {0}")]
    Transient(String),

    /// The body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the error is worth retrying at a later time.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. } | ApiError::Transient(_))
    }

    /// Whether the error signals a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Errors raised by the on-disk match cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid match id: {0:?}")]
    InvalidMatchId(String),

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record would not pass the store's own validation on read.
    #[error("Refusing to cache invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type alias for pipeline operations.
pub type RiftResult<T> = Result<T, RiftError>;

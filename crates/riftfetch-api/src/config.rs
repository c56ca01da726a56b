//! Client configuration.

use riftfetch_core::ApiError;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MATCH_BASE_URL: &str = "https://europe.api.riotgames.com/lol/match/v5";
pub const DEFAULT_ACCOUNT_BASE_URL: &str =
    "https://americas.api.riotgames.com/riot/account/v1/accounts";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Backoff used when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

/// Riot API configuration.
#[derive(Clone)]
pub struct RiotConfig {
    pub api_token: String,
    pub match_base_url: String,
    pub account_base_url: String,
    pub timeout: Duration,
}

impl RiotConfig {
    /// Create config with the default regional endpoints.
    pub fn new(api_token: impl Into<String>) -> Result<Self, ApiError> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ApiError::InvalidArgument("API token is empty".into()));
        }
        Ok(Self {
            api_token,
            match_base_url: DEFAULT_MATCH_BASE_URL.to_string(),
            account_base_url: DEFAULT_ACCOUNT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn with_match_base_url(mut self, url: impl Into<String>) -> Self {
        self.match_base_url = url.into();
        self
    }

    pub fn with_account_base_url(mut self, url: impl Into<String>) -> Self {
        self.account_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for RiotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotConfig")
            .field("api_token", &"[REDACTED]")
            .field("match_base_url", &self.match_base_url)
            .field("account_base_url", &self.account_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

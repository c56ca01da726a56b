//! HTTP transport.
//!
//! [`RiotClient`](crate::RiotClient) speaks to the network through
//! [`HttpTransport`] so status handling and backoff can be exercised against
//! scripted responses.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use riftfetch_core::ApiError;
use std::time::Duration;

use crate::config::RiotConfig;

/// Header carrying the API token.
const TOKEN_HEADER: &str = "X-Riot-Token";

/// The parts of an HTTP response the client looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// Parsed `Retry-After`, when present and numeric.
    pub retry_after: Option<Duration>,
    pub body: String,
}

impl HttpResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            retry_after: None,
            body: body.into(),
        }
    }

    /// An empty response with the given status.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            retry_after: None,
            body: String::new(),
        }
    }

    /// A 429 response with a `Retry-After` hint in seconds.
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            retry_after: Some(Duration::from_secs(retry_after_secs)),
            body: String::new(),
        }
    }
}

/// Authenticated GET transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET. Only transport-level failures are errors; every HTTP
    /// status, including 4xx and 5xx, comes back as a response.
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client that sends the token on every request.
    pub fn new(config: &RiotConfig) -> Result<Self, ApiError> {
        let mut token = header::HeaderValue::from_str(&config.api_token)
            .map_err(|e| {
                ApiError::InvalidArgument(format!("API token is not a valid header: {}", e))
            })?;
        token.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transient(format!("failed to build http client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Transient(format!("request timed out: {}", e))
            } else {
                ApiError::Transient(format!("request failed: {}", e))
            }
        })?;

        let status = resp.status();
        let retry_after = parse_retry_after(resp.headers());
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transient(format!("failed reading body: {}", e)))?;

        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}

fn parse_retry_after(headers: &header::HeaderMap) -> Option<Duration> {
    headers
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

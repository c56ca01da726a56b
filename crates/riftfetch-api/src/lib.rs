//! Riot match API client.

mod config;
mod riot;
mod transport;

pub use config::{
    RiotConfig, DEFAULT_ACCOUNT_BASE_URL, DEFAULT_MATCH_BASE_URL, DEFAULT_RETRY_AFTER,
    REQUEST_TIMEOUT,
};
pub use riot::RiotClient;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

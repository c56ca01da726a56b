//! Configuration structures.

use riftfetch_cache::ValidationMode;
use riftfetch_core::{RiftError, RiftResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub riot: RiotSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "riftfetch".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
    /// Directory-qualified file prefix for a daily rolling log.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Riot API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiotSettings {
    /// Name of the environment variable holding the API token.
    pub token_env: String,
    pub match_base_url: String,
    pub account_base_url: String,
    pub timeout_secs: u64,
}

impl Default for RiotSettings {
    fn default() -> Self {
        Self {
            token_env: "RIOT_API_TOKEN".to_string(),
            match_base_url: "https://europe.api.riotgames.com/lol/match/v5".to_string(),
            account_base_url: "https://americas.api.riotgames.com/riot/account/v1/accounts"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

impl RiotSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Batch fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchSettings {
    /// Cache directory.
    pub matches_dir: String,
    pub max_concurrency: usize,
    pub use_cache: bool,
    pub include_timeline: bool,
    pub validation: ValidationMode,
    /// Abort a whole batch after this many seconds. Unset means no limit.
    pub batch_timeout_secs: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            matches_dir: "matches".to_string(),
            max_concurrency: 10,
            use_cache: true,
            include_timeline: false,
            validation: ValidationMode::default(),
            batch_timeout_secs: None,
        }
    }
}

impl FetchSettings {
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> RiftResult<()> {
        if self.riot.token_env.trim().is_empty() {
            return Err(RiftError::Config("riot.token_env must not be empty".into()));
        }
        if self.riot.timeout_secs == 0 {
            return Err(RiftError::Config("riot.timeout_secs must be positive".into()));
        }
        for (key, url) in [
            ("riot.match_base_url", &self.riot.match_base_url),
            ("riot.account_base_url", &self.riot.account_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(RiftError::Config(format!("{} must be an http(s) URL: {}", key, url)));
            }
        }
        if self.fetch.matches_dir.trim().is_empty() {
            return Err(RiftError::Config("fetch.matches_dir must not be empty".into()));
        }
        if self.fetch.batch_timeout_secs == Some(0) {
            return Err(RiftError::Config("fetch.batch_timeout_secs must be positive".into()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(RiftError::Config(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> RiftResult<String> {
        toml::to_string_pretty(self).map_err(|e| RiftError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.riot.timeout(), Duration::from_secs(30));
        assert_eq!(config.fetch.batch_timeout(), None);
        assert_eq!(config.fetch.validation, ValidationMode::Strict);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.riot.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.riot.match_base_url = "europe.api.riotgames.com".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.fetch.batch_timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.fetch.batch_timeout_secs = Some(120);
        config.logging.file = Some("logs/riftfetch".into());

        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}

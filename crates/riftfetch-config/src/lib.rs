//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, FetchSettings, LoggingConfig, RiotSettings};

use config::{Config, ConfigError, Environment, File};
use riftfetch_core::{RiftError, RiftResult};
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `RIFTFETCH__FETCH__MAX_CONCURRENCY=4`.
pub const ENV_PREFIX: &str = "RIFTFETCH";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, true)
}

/// Like [`load_config`], but a missing file falls back to defaults.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, false)
}

/// Load with defaults for a missing file, then reject unusable values.
pub fn load_runtime_config(path: &Path) -> RiftResult<AppConfig> {
    let config = load_config_or_default(path).map_err(|e| RiftError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn build(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

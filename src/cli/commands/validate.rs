//! Validate configuration command.

use anyhow::Result;
use riftfetch_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("{}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Match API: {}", config.riot.match_base_url);
    println!("Account API: {}", config.riot.account_base_url);
    println!(
        "API token ({}): {}",
        config.riot.token_env,
        if std::env::var_os(&config.riot.token_env).is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("Cache directory: {}", config.fetch.matches_dir);
    println!("Max concurrency: {}", config.fetch.max_concurrency);
    println!("Validation: {:?}", config.fetch.validation);

    Ok(())
}

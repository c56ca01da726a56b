//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riftfetch")]
#[command(author, version, about = "Fetch and cache League of Legends match data")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a player's most recent matches into the cache
    Fetch(FetchArgs),
    /// Top up the cache until a player has enough matches
    Ensure(EnsureArgs),
    /// Inspect the match cache
    Cache(CacheArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Riot ID game name
    pub game_name: String,

    /// Riot ID tag line (without '#')
    pub tag_line: String,

    /// Number of recent matches to fetch
    pub count: usize,

    /// Ignore cached entries and refetch everything
    #[arg(long)]
    pub no_cache: bool,

    /// Also fetch match timelines
    #[arg(long)]
    pub include_timeline: bool,

    /// Maximum simultaneous match fetches
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Print the metrics summary when done
    #[arg(long)]
    pub show_metrics: bool,

    /// Write the metrics snapshot to a JSON file
    #[arg(long)]
    pub metrics_json: Option<PathBuf>,

    /// Cache directory (overrides the configured one)
    #[arg(long)]
    pub matches_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct EnsureArgs {
    /// Riot ID game name
    pub game_name: String,

    /// Riot ID tag line (without '#')
    pub tag_line: String,

    /// Required number of cached matches
    #[arg(long, default_value = "1")]
    pub min_matches: usize,

    /// Ids to list when the cache falls short
    #[arg(long, default_value = "10")]
    pub fetch_count: usize,

    /// Cache directory (overrides the configured one)
    #[arg(long)]
    pub matches_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CacheArgs {
    /// Cache directory (overrides the configured one)
    #[arg(long)]
    pub matches_dir: Option<PathBuf>,

    /// Count cached matches that include this player
    #[arg(long)]
    pub puuid: Option<String>,

    /// List every valid entry
    #[arg(long)]
    pub list: bool,
}

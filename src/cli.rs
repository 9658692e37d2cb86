//! Command-line interface parsing for Wikipedia Places CLI
//!
//! This module handles parsing of CLI arguments using clap and validating them
//! into the `RunConfig` the binary runs with.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cache::CacheConfig;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    /// The TTL is negative or not a finite number
    #[error("Invalid TTL: '{0}'. The TTL must be a finite number of seconds, zero or greater")]
    InvalidTtl(f64),

    /// The watch interval is too short
    #[error("Invalid watch interval: '{0}'. The interval must be at least 1 second")]
    InvalidInterval(u64),

    /// `--ttl` was given together with `--no-cache`
    #[error("--ttl cannot be combined with --no-cache")]
    ConflictingCacheOptions,
}

/// How the place list is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per place
    #[default]
    Text,
    /// A JSON array of places
    Json,
}

/// Wikipedia Places CLI - List places and their Wikipedia links
#[derive(Parser, Debug)]
#[command(name = "wikiplaces")]
#[command(about = "Fetch named places and link them to Wikipedia")]
#[command(version)]
pub struct Cli {
    /// Base URL hosting the places document (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Path to a config file (defaults to the XDG config location)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Always fetch from the network and never cache responses
    #[arg(long)]
    pub no_cache: bool,

    /// How long fetched places stay cached, in seconds (default 90)
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub ttl: Option<f64>,

    /// Keep running and re-fetch the places every SECONDS
    ///
    /// Examples:
    ///   wikiplaces --watch 30             # Re-fetch every 30s, cached for 90s
    ///   wikiplaces --watch 30 --ttl 10    # Cache expires between most fetches
    #[arg(long, value_name = "SECONDS")]
    pub watch: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Validated settings derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Override for the places base URL
    pub base_url: Option<String>,
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Cache policy for every request
    pub cache_config: CacheConfig,
    /// Re-fetch interval in watch mode
    pub watch_interval: Option<Duration>,
    /// Output format
    pub format: OutputFormat,
    /// Log verbosity level
    pub verbosity: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            config_path: None,
            cache_config: CacheConfig::active(),
            watch_interval: None,
            format: OutputFormat::Text,
            verbosity: 0,
        }
    }
}

/// Parses a TTL argument into a cache policy.
///
/// # Arguments
/// * `ttl` - TTL in seconds from the CLI
///
/// # Returns
/// * `Ok(CacheConfig)` with the given TTL
/// * `Err(CliError::InvalidTtl)` if the TTL is negative, NaN or infinite
pub fn parse_ttl_arg(ttl: f64) -> Result<CacheConfig, CliError> {
    if !ttl.is_finite() || ttl < 0.0 {
        return Err(CliError::InvalidTtl(ttl));
    }
    Ok(CacheConfig::with_ttl(ttl))
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with appropriate settings
    /// * `Err(CliError)` if the cache or watch options are invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let cache_config = match (cli.no_cache, cli.ttl) {
            (true, Some(_)) => return Err(CliError::ConflictingCacheOptions),
            (true, None) => CacheConfig::Disabled,
            (false, Some(ttl)) => parse_ttl_arg(ttl)?,
            (false, None) => CacheConfig::active(),
        };

        let watch_interval = match cli.watch {
            None => None,
            Some(0) => return Err(CliError::InvalidInterval(0)),
            Some(secs) => Some(Duration::from_secs(secs)),
        };

        Ok(RunConfig {
            base_url: cli.base_url.clone(),
            config_path: cli.config.clone(),
            cache_config,
            watch_interval,
            format: cli.format,
            verbosity: cli.verbose,
        })
    }
}

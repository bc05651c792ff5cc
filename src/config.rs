use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default CoinMarketCap REST base URL.
pub const DEFAULT_CMC_API_URL: &str = "https://pro-api.coinmarketcap.com/v1";
/// Default Coinbase Exchange REST base URL.
pub const DEFAULT_COINBASE_API_URL: &str = "https://api.exchange.coinbase.com";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// CoinMarketCap API key (required).
    pub cmc_api_key: String,
    /// CoinMarketCap REST base URL.
    pub cmc_api_url: String,
    /// Coinbase Exchange REST base URL.
    pub coinbase_api_url: String,
    /// Number of listings to analyze.
    pub listing_limit: u32,
    /// Number of listings reported as the market-cap leaderboard.
    pub top_limit: u32,
    /// Where the JSON report is written.
    pub output_path: PathBuf,
    /// Timeout applied to every outbound HTTP request.
    pub http_timeout: Duration,
}

impl Config {
    /// Build a configuration with defaults around the given API key.
    pub fn new(cmc_api_key: impl Into<String>) -> Self {
        Self {
            cmc_api_key: cmc_api_key.into(),
            cmc_api_url: DEFAULT_CMC_API_URL.to_string(),
            coinbase_api_url: DEFAULT_COINBASE_API_URL.to_string(),
            listing_limit: 50,
            top_limit: 10,
            output_path: PathBuf::from("scripts/output.json"),
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails when `COINMARKETCAP_API_KEY` is missing or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("COINMARKETCAP_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("No API key found in environment variable COINMARKETCAP_API_KEY".to_string())
            })?;

        let defaults = Self::new(api_key);

        Ok(Self {
            cmc_api_url: env::var("CMC_API_URL").unwrap_or(defaults.cmc_api_url.clone()),
            coinbase_api_url: env::var("COINBASE_API_URL")
                .unwrap_or(defaults.coinbase_api_url.clone()),
            listing_limit: env::var("LISTING_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.listing_limit),
            top_limit: env::var("TOP_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.top_limit),
            output_path: env::var("OUTPUT_PATH")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path.clone()),
            http_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            ..defaults
        })
    }
}

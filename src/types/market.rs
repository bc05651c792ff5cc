use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Point-in-time USD market data for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub name: String,
    /// Spot price in USD.
    pub price: f64,
    /// Traded volume over the last 24 hours, in USD.
    pub volume_24h: f64,
    /// Signed percent change over the last 24 hours. `None` when the
    /// provider omitted it.
    pub percent_change_24h: Option<f64>,
}

impl MarketSnapshot {
    /// 24h percent change, with a missing value treated as no change.
    pub fn change_24h(&self) -> f64 {
        self.percent_change_24h.unwrap_or(0.0)
    }
}

/// Base-asset tickers that can be traded on the target venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradableSet {
    symbols: HashSet<String>,
}

impl TradableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a ticker is tradable. Matching is exact.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TradableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A market-cap leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCrypto {
    /// 1-based position in the leaderboard.
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
    pub price: f64,
    pub volume: f64,
}

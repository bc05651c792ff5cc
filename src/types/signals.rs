use super::TopCrypto;
use serde::{Deserialize, Serialize};

/// Normalized opposing buy/sell weights, each in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CertaintyPair {
    pub buy: f64,
    pub sell: f64,
}

impl CertaintyPair {
    /// True when the buy side strictly outweighs the sell side.
    pub fn favors_buy(&self) -> bool {
        self.buy > self.sell
    }
}

/// A buy candidate emitted for one tradable asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// RSI-style oscillator, `None` when the price path had no movement.
    pub rsi: Option<f64>,
    pub volume: f64,
    pub buy: f64,
    pub sell: f64,
    pub percent_change_24h: f64,
}

/// Holding horizon and projected return for the best signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub holding_days: u32,
    pub projected_profit_per_100: f64,
}

/// Final output of a scan run.
///
/// `best_bet`, `suggested_holding_time` and `projected_profit_per_100` are
/// all `null` together when no signal qualified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub buy_signals: Vec<Signal>,
    pub top_10_cryptos: Vec<TopCrypto>,
    pub best_bet: Option<Signal>,
    pub suggested_holding_time: Option<u32>,
    pub projected_profit_per_100: Option<f64>,
    /// UTC, formatted `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
}

impl SignalReport {
    pub fn has_signal(&self) -> bool {
        self.best_bet.is_some()
    }
}

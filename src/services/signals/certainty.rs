//! Buy/sell certainty scoring.
//!
//! Blends the oscillator, the 24h price move and traded volume into two
//! opposing raw scores, then normalizes them into percentages.

use crate::types::CertaintyPair;

/// RSI below which an asset counts as oversold.
pub const OVERSOLD: f64 = 30.0;
/// RSI above which an asset counts as overbought.
pub const OVERBOUGHT: f64 = 70.0;

const RSI_WEIGHT: f64 = 2.0;
const PRICE_CHANGE_WEIGHT: f64 = 3.0;
const VOLUME_WEIGHT: f64 = 0.0005;

/// Score one asset.
///
/// An undefined oscillator is neither oversold nor overbought. Volume is added
/// to both sides, so it only dampens the directional terms.
pub fn calculate_certainty(percent_change: f64, rsi: Option<f64>, volume: f64) -> CertaintyPair {
    let mut buy_score = 0.0;
    let mut sell_score = 0.0;

    match rsi {
        Some(value) if value < OVERSOLD => buy_score += (OVERSOLD - value) * RSI_WEIGHT,
        Some(value) if value > OVERBOUGHT => sell_score += (value - OVERBOUGHT) * RSI_WEIGHT,
        _ => {}
    }

    if percent_change < 0.0 {
        buy_score += percent_change.abs() * PRICE_CHANGE_WEIGHT;
    } else if percent_change > 0.0 {
        sell_score += percent_change * PRICE_CHANGE_WEIGHT;
    }

    let volume_score = volume.max(0.0) * VOLUME_WEIGHT;
    buy_score += volume_score;
    sell_score += volume_score;

    let total = buy_score + sell_score;
    if total <= 0.0 || !total.is_finite() {
        return CertaintyPair::default();
    }

    CertaintyPair {
        buy: round2(buy_score / total * 100.0),
        sell: round2(sell_score / total * 100.0),
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

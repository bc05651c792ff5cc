//! Holding-horizon and profit projection for the best signal.
//!
//! The projection compounds the asset's own 24h percent change as if the same
//! daily move repeated for every day of the horizon. That is a modeling
//! assumption, not a forecast.

use super::certainty::round2;
use crate::types::{Recommendation, Signal};

/// Suggested holding period in days, shorter for more volatile assets.
///
/// | \|change\| | days |
/// |---|---|
/// | < 2 | 14 |
/// | 2 ..< 5 | 7 |
/// | >= 5 | 2 |
pub fn holding_days(percent_change_24h: f64) -> u32 {
    let magnitude = percent_change_24h.abs();
    if magnitude < 2.0 {
        14
    } else if magnitude < 5.0 {
        7
    } else {
        2
    }
}

/// Profit per 100 USD invested after compounding `percent_change_24h` daily
/// for `days`, rounded to cents.
pub fn projected_profit(price: f64, percent_change_24h: f64, days: u32) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    let daily_rate = percent_change_24h / 100.0;
    let projected_price = price * (1.0 + daily_rate).powi(days as i32);
    round2((projected_price - price) * (100.0 / price))
}

/// Derive the full recommendation for a signal.
pub fn recommend(signal: &Signal) -> Recommendation {
    let days = holding_days(signal.percent_change_24h);
    Recommendation {
        holding_days: days,
        projected_profit_per_100: projected_profit(signal.price, signal.percent_change_24h, days),
    }
}

//! Relative Strength Index (RSI) indicator.

/// Number of repeated base prices in a synthetic path.
pub const SYNTHETIC_BASE_POINTS: usize = 14;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Averages are plain means over the trailing window, not Wilder smoothing.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Minimum number of prices required for a value.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// Calculate the RSI at the last price.
    ///
    /// Returns `None` with insufficient data, or when the window holds neither
    /// gains nor losses. A window with gains and no losses reads 100.
    pub fn calculate(&self, prices: &[f64]) -> Option<f64> {
        if self.period == 0 || prices.len() < self.min_periods() {
            return None;
        }

        let window = &prices[prices.len() - self.min_periods()..];
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;

        for pair in window.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gain_sum += change;
            } else if change < 0.0 {
                loss_sum -= change;
            }
        }

        let avg_gain = gain_sum / self.period as f64;
        let avg_loss = loss_sum / self.period as f64;

        if avg_loss == 0.0 {
            return if avg_gain > 0.0 { Some(100.0) } else { None };
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

/// Build the stand-in price history for a single 24h snapshot: the implied
/// price a day ago repeated [`SYNTHETIC_BASE_POINTS`] times, then the current price.
pub fn synthetic_price_path(price: f64, percent_change_24h: f64) -> Vec<f64> {
    let previous = price * (1.0 - percent_change_24h / 100.0);
    let mut path = vec![previous; SYNTHETIC_BASE_POINTS];
    path.push(price);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uptrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    fn downtrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 200.0 - i as f64 * 1.5).collect()
    }

    #[test]
    fn test_rsi_min_periods() {
        assert_eq!(Rsi::default().min_periods(), 15);
        assert_eq!(Rsi::new(7).min_periods(), 8);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::default();
        assert!(rsi.calculate(&uptrend(14)).is_none());
        assert!(rsi.calculate(&[]).is_none());
    }

    #[test]
    fn test_rsi_zero_period() {
        assert!(Rsi::new(0).calculate(&uptrend(5)).is_none());
    }

    #[test]
    fn test_rsi_pure_uptrend_is_100() {
        assert_eq!(Rsi::default().calculate(&uptrend(30)), Some(100.0));
    }

    #[test]
    fn test_rsi_pure_downtrend_is_0() {
        assert_eq!(Rsi::default().calculate(&downtrend(30)), Some(0.0));
    }

    #[test]
    fn test_rsi_mixed_series() {
        // Alternating +2 / -1 moves: 7 gains of 2 and 7 losses of 1 in the window.
        let mut prices = vec![100.0];
        for i in 0..20 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let value = Rsi::default().calculate(&prices).unwrap();
        // rs = 2.0, rsi = 100 - 100 / 3
        assert!((value - 66.666_666).abs() < 1e-4, "got {}", value);
    }

    #[test]
    fn test_rsi_uses_trailing_window_only() {
        // Early losses fall outside the 14-change window.
        let mut prices = downtrend(10);
        prices.extend(uptrend(15).into_iter().map(|p| p + 200.0));
        assert_eq!(Rsi::default().calculate(&prices), Some(100.0));
    }

    #[test]
    fn test_synthetic_path_shape() {
        let path = synthetic_price_path(110.0, 10.0);
        assert_eq!(path.len(), 15);
        assert!(path[..14].iter().all(|p| (*p - 99.0).abs() < 1e-9));
        assert_eq!(path[14], 110.0);
    }

    #[test]
    fn test_synthetic_path_rsi() {
        let rsi = Rsi::default();
        assert_eq!(rsi.calculate(&synthetic_price_path(100.0, 5.0)), Some(100.0));
        assert_eq!(rsi.calculate(&synthetic_price_path(100.0, -5.0)), Some(0.0));
        assert_eq!(rsi.calculate(&synthetic_price_path(100.0, 0.0)), None);
    }
}

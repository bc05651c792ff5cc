//! Tradability filter and best-signal selection.

use super::certainty::calculate_certainty;
use super::indicators::{synthetic_price_path, Rsi};
use crate::types::{MarketSnapshot, Signal, TradableSet};
use tracing::debug;

/// Score every tradable snapshot and keep the ones that lean towards buying.
///
/// Output preserves input order. Snapshots whose symbol is not in `tradable`
/// are skipped, as are ties between buy and sell.
pub fn analyze(snapshots: &[MarketSnapshot], tradable: &TradableSet) -> Vec<Signal> {
    let rsi = Rsi::default();

    snapshots
        .iter()
        .filter(|snapshot| tradable.contains(&snapshot.symbol))
        .filter_map(|snapshot| {
            let change = snapshot.change_24h();
            let value = rsi.calculate(&synthetic_price_path(snapshot.price, change));
            let certainty = calculate_certainty(change, value, snapshot.volume_24h);

            if !certainty.favors_buy() {
                debug!(
                    "Skipping {}: buy {:.2}% <= sell {:.2}%",
                    snapshot.symbol, certainty.buy, certainty.sell
                );
                return None;
            }

            Some(Signal {
                symbol: snapshot.symbol.clone(),
                name: snapshot.name.clone(),
                price: snapshot.price,
                rsi: value,
                volume: snapshot.volume_24h,
                buy: certainty.buy,
                sell: certainty.sell,
                percent_change_24h: change,
            })
        })
        .collect()
}

/// The signal with the highest buy certainty. The first one wins a tie.
pub fn best_signal(signals: &[Signal]) -> Option<&Signal> {
    signals.iter().fold(None, |best: Option<&Signal>, signal| match best {
        Some(current) if current.buy >= signal.buy => Some(current),
        _ => Some(signal),
    })
}

//! Console rendering of scan results.

use crate::sources::id_label;
use crate::types::{SignalReport, TopCrypto};
use std::collections::HashMap;
use std::fmt::Write;

const RULE_WIDTH: usize = 55;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn fmt_rsi(rsi: Option<f64>) -> String {
    rsi.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string())
}

/// Render the buy-signal tables, or a notice when there are none.
///
/// `ids` supplies CoinMarketCap IDs; unknown symbols show as `N/A`.
pub fn render_signals(report: &SignalReport, ids: &HashMap<String, i64>) -> String {
    let mut out = String::new();

    if !report.has_signal() {
        out.push_str("No buy signals found among Coinbase-supported coins.\n");
        return out;
    }

    let _ = writeln!(out, "\nPotential Buy Signals (Coinbase-Only):");
    let _ = writeln!(
        out,
        "{:<10} {:<8} {:<12} {:<8} {:<15}",
        "Coin", "CMC ID", "Price ($)", "RSI", "Volume ($)"
    );
    let _ = writeln!(out, "{}", rule());
    for signal in &report.buy_signals {
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:<12.2} {:<8} {:<15.2}",
            signal.symbol,
            id_label(ids, &signal.symbol),
            signal.price,
            fmt_rsi(signal.rsi),
            signal.volume
        );
    }

    let _ = writeln!(out, "\nBuy/Sell Certainty Scores:");
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:<10} {:<10}",
        "Coin", "Price ($)", "Buy (%)", "Sell (%)"
    );
    let _ = writeln!(out, "{}", rule());
    for signal in &report.buy_signals {
        let _ = writeln!(
            out,
            "{:<10} {:<12.2} {:<10.2} {:<10.2}",
            signal.symbol, signal.price, signal.buy, signal.sell
        );
    }

    if let Some(best) = &report.best_bet {
        let _ = writeln!(
            out,
            "\nBest Decision: BUY {}% for {} ({}) at ${:.2}",
            best.buy, best.symbol, best.name, best.price
        );
    }
    if let (Some(days), Some(profit)) =
        (report.suggested_holding_time, report.projected_profit_per_100)
    {
        let _ = writeln!(
            out,
            "Suggested holding time: {} days, projected profit per $100: ${:.2}",
            days, profit
        );
    }

    out
}

/// Render the market-cap leaderboard.
pub fn render_top_cryptos(top: &[TopCrypto]) -> String {
    let mut out = String::new();
    if top.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nTop {} Cryptocurrencies by Market Cap:", top.len());
    let _ = writeln!(
        out,
        "{:<5} {:<10} {:<20} {:<14}",
        "Rank", "Coin", "Market Cap ($)", "Price ($)"
    );
    let _ = writeln!(out, "{}", rule());
    for entry in top {
        let _ = writeln!(
            out,
            "{:<5} {:<10} {:<20.0} {:<14.2}",
            entry.rank, entry.symbol, entry.market_cap, entry.price
        );
    }
    out
}

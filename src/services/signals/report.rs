//! Assembles scan results into a [`SignalReport`].

use super::horizon::recommend;
use super::ranker::{analyze, best_signal};
use crate::error::{AppError, Result};
use crate::services::ReportWriter;
use crate::types::{MarketSnapshot, Signal, SignalReport, TopCrypto, TradableSet};
use chrono::{DateTime, Utc};
use tracing::info;

/// Timestamp format used in reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Package signals into a report stamped with `generated_at`.
///
/// The best signal and its recommendation are derived here, so the three
/// optional fields are either all set or all `None`.
pub fn assemble_report_at(
    buy_signals: Vec<Signal>,
    top_cryptos: Vec<TopCrypto>,
    generated_at: DateTime<Utc>,
) -> SignalReport {
    let best_bet = best_signal(&buy_signals).cloned();
    let recommendation = best_bet.as_ref().map(recommend);

    SignalReport {
        buy_signals,
        top_10_cryptos: top_cryptos,
        best_bet,
        suggested_holding_time: recommendation.map(|r| r.holding_days),
        projected_profit_per_100: recommendation.map(|r| r.projected_profit_per_100),
        timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Run the whole pipeline over one snapshot of the market, stamped now.
pub fn scan(
    snapshots: &[MarketSnapshot],
    tradable: &TradableSet,
    top_cryptos: Vec<TopCrypto>,
) -> SignalReport {
    assemble_report_at(analyze(snapshots, tradable), top_cryptos, Utc::now())
}

/// Scan fetched inputs and write the report.
///
/// An empty tradable set or missing/empty market data ends the run with an
/// error before anything is written.
pub fn run_scan(
    tradable: &TradableSet,
    market_data: Option<Vec<MarketSnapshot>>,
    top_cryptos: Vec<TopCrypto>,
    writer: &ReportWriter,
) -> Result<SignalReport> {
    if tradable.is_empty() {
        return Err(AppError::NoTradableSymbols);
    }
    let market_data = market_data
        .filter(|data| !data.is_empty())
        .ok_or(AppError::NoMarketData)?;

    let report = scan(&market_data, tradable, top_cryptos);
    info!(
        "Found {} buy signals across {} listings",
        report.buy_signals.len(),
        market_data.len()
    );

    writer.write(&report)?;
    Ok(report)
}

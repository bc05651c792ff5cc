//! Coinscout - one-shot cryptocurrency buy-signal scanner.
//!
//! Pulls tradable symbols from Coinbase and listings from CoinMarketCap, scores
//! each tradable asset, and reports the strongest buy candidate together with
//! a holding horizon and projected profit.

pub mod config;
pub mod display;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use services::{run_scan, scan, ReportWriter};
pub use types::*;

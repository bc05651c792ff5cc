//! Technical indicator implementations.

pub mod rsi;

pub use rsi::{synthetic_price_path, Rsi};

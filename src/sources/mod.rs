pub mod coinbase;
pub mod coinmarketcap;

pub use coinbase::CoinbaseClient;
pub use coinmarketcap::{id_label, CoinMarketCapClient};

use crate::config::Config;
use crate::types::TradableSet;
use anyhow::{bail, Context};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

/// Coinbase Exchange product entry.
#[derive(Debug, Deserialize)]
struct Product {
    base_currency: String,
}

/// Coinbase Exchange REST client for the product catalogue.
#[derive(Clone)]
pub struct CoinbaseClient {
    client: Client,
    base_url: String,
}

impl CoinbaseClient {
    /// Create a new Coinbase client.
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        // Coinbase rejects requests without a User-Agent.
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building Coinbase HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.coinbase_api_url.clone(), config.http_timeout)
    }

    /// Fetch base currencies of every listed product (e.g. `BTC` from
    /// `BTC-USD`). Returns an empty set on any failure.
    pub async fn fetch_tradable_symbols(&self) -> TradableSet {
        match self.try_fetch_products().await {
            Ok(symbols) => {
                info!("Fetched {} tradable symbols from Coinbase", symbols.len());
                symbols
            }
            Err(e) => {
                error!("Error fetching Coinbase products: {:#}", e);
                TradableSet::new()
            }
        }
    }

    async fn try_fetch_products(&self) -> anyhow::Result<TradableSet> {
        let url = format!("{}/products", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP {}", status);
        }

        let text = resp.text().await?;
        parse_products(&text)
    }
}

fn parse_products(text: &str) -> anyhow::Result<TradableSet> {
    let products: Vec<Product> =
        serde_json::from_str(text).context("parsing Coinbase products payload")?;
    Ok(products.into_iter().map(|p| p.base_currency).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products() {
        let body = r#"[
            {"id": "BTC-USD", "base_currency": "BTC", "quote_currency": "USD", "status": "online"},
            {"id": "BTC-EUR", "base_currency": "BTC", "quote_currency": "EUR", "status": "online"},
            {"id": "ETH-USD", "base_currency": "ETH", "quote_currency": "USD", "status": "online"}
        ]"#;
        let symbols = parse_products(body).unwrap();

        assert_eq!(symbols.len(), 2);
        assert!(symbols.contains("BTC"));
        assert!(symbols.contains("ETH"));
    }

    #[test]
    fn test_parse_products_rejects_error_body() {
        assert!(parse_products(r#"{"message": "User-Agent header is required."}"#).is_err());
    }

    #[test]
    fn test_unreachable_host_yields_empty_set() {
        let client =
            CoinbaseClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(2)).unwrap();
        let symbols = tokio_test::block_on(client.fetch_tradable_symbols());
        assert!(symbols.is_empty());
    }
}

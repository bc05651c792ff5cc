use crate::config::Config;
use crate::types::{MarketSnapshot, TopCrypto};
use anyhow::{bail, Context};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Placeholder shown when a symbol has no CoinMarketCap ID.
pub const MISSING_ID: &str = "N/A";

/// CoinMarketCap REST client.
///
/// Every call is attempted once. Failures are logged and surface as an empty
/// or `None` result rather than an error.
#[derive(Clone)]
pub struct CoinMarketCapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CmcResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CmcListingData {
    name: String,
    symbol: String,
    quote: Option<HashMap<String, CmcQuote>>,
}

#[derive(Debug, Clone, Deserialize)]
struct CmcQuote {
    price: Option<f64>,
    volume_24h: Option<f64>,
    percent_change_24h: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CmcMapEntry {
    id: i64,
    symbol: String,
}

impl CmcListingData {
    fn usd(&self) -> Option<&CmcQuote> {
        self.quote.as_ref().and_then(|m| m.get("USD"))
    }
}

/// First 200 characters of a response body, for log lines.
fn excerpt(text: &str) -> String {
    text.chars().take(200).collect()
}

// Non-finite values are treated as missing.
fn finite(val: Option<f64>) -> Option<f64> {
    val.filter(|v| v.is_finite())
}

impl CoinMarketCapClient {
    /// Create a new CoinMarketCap client.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building CoinMarketCap HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.cmc_api_key.clone(),
            config.cmc_api_url.clone(),
            config.http_timeout,
        )
    }

    /// Fetch the top `limit` listings by market cap as market snapshots.
    ///
    /// Returns `None` on a non-success status, a malformed payload, a missing
    /// `data` key or a network error.
    pub async fn fetch_market_data(&self, limit: u32) -> Option<Vec<MarketSnapshot>> {
        match self.fetch_listings(limit).await {
            Ok(Some(listings)) => {
                let snapshots: Vec<MarketSnapshot> =
                    listings.into_iter().filter_map(to_snapshot).collect();
                info!("Fetched {} market snapshots from CoinMarketCap", snapshots.len());
                Some(snapshots)
            }
            Ok(None) => None,
            Err(e) => {
                error!("CoinMarketCap listings fetch error: {:#}", e);
                None
            }
        }
    }

    /// Fetch the market-cap leaderboard. Empty on failure.
    pub async fn fetch_top_cryptos(&self, limit: u32) -> Vec<TopCrypto> {
        match self.fetch_listings(limit).await {
            Ok(Some(listings)) => to_top_cryptos(listings),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("CoinMarketCap top listings fetch error: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Look up CoinMarketCap IDs for the given symbols. Empty on failure.
    pub async fn fetch_id_map(&self, symbols: &[String]) -> HashMap<String, i64> {
        if symbols.is_empty() {
            return HashMap::new();
        }

        let batch_err = match self.try_fetch_id_map(symbols).await {
            Ok(map) => return map,
            Err(e) => e,
        };

        // One unknown symbol fails the whole batch, so retry each on its own.
        warn!(
            "CoinMarketCap ID map fetch for [{}] failed, looking up individually: {:#}",
            symbols.join(","),
            batch_err
        );

        let mut ids = HashMap::new();
        for symbol in symbols {
            match self.try_fetch_id_map(std::slice::from_ref(symbol)).await {
                Ok(map) => ids.extend(map),
                Err(e) => debug!("No CoinMarketCap ID for {}: {:#}", symbol, e),
            }
        }
        ids
    }

    async fn fetch_listings(&self, limit: u32) -> anyhow::Result<Option<Vec<CmcListingData>>> {
        let url = format!("{}/cryptocurrency/listings/latest", self.base_url);
        let limit = limit.to_string();

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("start", "1"), ("limit", limit.as_str()), ("convert", "USD")])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            warn!(
                "CMC listings request failed: {} - {}",
                status,
                excerpt(&text)
            );
            return Ok(None);
        }

        parse_listings(&text)
    }

    async fn try_fetch_id_map(&self, symbols: &[String]) -> anyhow::Result<HashMap<String, i64>> {
        let url = format!("{}/cryptocurrency/map", self.base_url);
        let joined = symbols.join(",");

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("symbol", joined.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            bail!("status {} - {}", status, excerpt(&text));
        }

        parse_id_map(&text)
    }
}

/// Render an optional CoinMarketCap ID for display.
pub fn id_label(ids: &HashMap<String, i64>, symbol: &str) -> String {
    ids.get(symbol)
        .map(|id| id.to_string())
        .unwrap_or_else(|| MISSING_ID.to_string())
}

fn parse_listings(text: &str) -> anyhow::Result<Option<Vec<CmcListingData>>> {
    let parsed: CmcResponse<Vec<CmcListingData>> =
        serde_json::from_str(text).context("parsing CMC listings payload")?;

    if parsed.data.is_none() {
        warn!(
            "'data' key not found in CMC response: {}",
            excerpt(text)
        );
    }

    Ok(parsed.data)
}

fn parse_id_map(text: &str) -> anyhow::Result<HashMap<String, i64>> {
    let parsed: CmcResponse<Vec<CmcMapEntry>> =
        serde_json::from_str(text).context("parsing CMC map payload")?;

    let mut ids = HashMap::new();
    // The map endpoint can return several assets per symbol; keep the first.
    for entry in parsed.data.unwrap_or_default() {
        ids.entry(entry.symbol).or_insert(entry.id);
    }
    Ok(ids)
}

fn to_snapshot(data: CmcListingData) -> Option<MarketSnapshot> {
    let quote = data.usd();
    let price = match finite(quote.and_then(|q| q.price)) {
        Some(p) if p > 0.0 => p,
        _ => {
            debug!("Skipping {}: no usable USD price", data.symbol);
            return None;
        }
    };
    let volume_24h = finite(quote.and_then(|q| q.volume_24h))
        .unwrap_or(0.0)
        .max(0.0);
    let percent_change_24h = finite(quote.and_then(|q| q.percent_change_24h));

    Some(MarketSnapshot {
        symbol: data.symbol,
        name: data.name,
        price,
        volume_24h,
        percent_change_24h,
    })
}

fn to_top_cryptos(listings: Vec<CmcListingData>) -> Vec<TopCrypto> {
    listings
        .into_iter()
        .enumerate()
        .map(|(idx, data)| {
            let quote = data.usd().cloned();
            TopCrypto {
                rank: idx as u32 + 1,
                market_cap: finite(quote.as_ref().and_then(|q| q.market_cap)).unwrap_or(0.0),
                price: finite(quote.as_ref().and_then(|q| q.price)).unwrap_or(0.0),
                volume: finite(quote.as_ref().and_then(|q| q.volume_24h)).unwrap_or(0.0),
                name: data.name,
                symbol: data.symbol,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS: &str = r#"{
        "status": {"error_code": 0},
        "data": [
            {"id": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin",
             "quote": {"USD": {"price": 64000.5, "volume_24h": 2.5e10,
                               "percent_change_24h": -1.25, "market_cap": 1.2e12}}},
            {"id": 1027, "name": "Ethereum", "symbol": "ETH", "slug": "ethereum",
             "quote": {"USD": {"price": 3100.0, "volume_24h": null,
                               "percent_change_24h": null, "market_cap": 3.7e11}}},
            {"id": 9999, "name": "Ghost", "symbol": "GST", "slug": "ghost",
             "quote": {"USD": {"price": null}}}
        ]
    }"#;

    #[test]
    fn test_parse_listings_to_snapshots() {
        let listings = parse_listings(LISTINGS).unwrap().unwrap();
        let snapshots: Vec<_> = listings.into_iter().filter_map(to_snapshot).collect();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].symbol, "BTC");
        assert_eq!(snapshots[0].name, "Bitcoin");
        assert_eq!(snapshots[0].price, 64000.5);
        assert_eq!(snapshots[0].volume_24h, 2.5e10);
        assert_eq!(snapshots[0].percent_change_24h, Some(-1.25));
        assert_eq!(snapshots[1].volume_24h, 0.0);
        assert_eq!(snapshots[1].percent_change_24h, None);
    }

    #[test]
    fn test_parse_listings_missing_data() {
        let body = r#"{"status": {"error_code": 1002, "error_message": "API key missing."}}"#;
        assert!(parse_listings(body).unwrap().is_none());
    }

    #[test]
    fn test_parse_listings_malformed() {
        assert!(parse_listings("<html>oops</html>").is_err());
    }

    #[test]
    fn test_top_cryptos_are_ranked() {
        let listings = parse_listings(LISTINGS).unwrap().unwrap();
        let top = to_top_cryptos(listings);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].market_cap, 1.2e12);
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].volume, 0.0);
        assert_eq!(top[2].symbol, "GST");
        assert_eq!(top[2].price, 0.0);
    }

    #[test]
    fn test_parse_id_map_keeps_first() {
        let body = r#"{"data": [
            {"id": 1, "symbol": "BTC", "name": "Bitcoin"},
            {"id": 74, "symbol": "DOGE", "name": "Dogecoin"},
            {"id": 23000, "symbol": "DOGE", "name": "Other Doge"}
        ]}"#;
        let ids = parse_id_map(body).unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(ids["DOGE"], 74);
        assert_eq!(id_label(&ids, "BTC"), "1");
        assert_eq!(id_label(&ids, "XYZ"), MISSING_ID);
    }

    /// Serve `/cryptocurrency/map` like CoinMarketCap: 400 for any batch
    /// containing an unknown symbol.
    async fn spawn_map_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = vec![0u8; 4096];
                let mut len = 0;
                while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[len..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => len += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..len]).to_string();
                let query = request
                    .split_whitespace()
                    .nth(1)
                    .and_then(|path| path.split("symbol=").nth(1))
                    .unwrap_or("")
                    .to_string();

                let (status, body) = match query.as_str() {
                    "BTC" => ("200 OK", r#"{"data": [{"id": 1, "symbol": "BTC"}]}"#),
                    "ETH" => ("200 OK", r#"{"data": [{"id": 1027, "symbol": "ETH"}]}"#),
                    _ => ("400 Bad Request", r#"{"status": {"error_code": 400}}"#),
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_id_map_falls_back_to_single_lookups() {
        tokio_test::block_on(async {
            let base_url = spawn_map_server().await;
            let client =
                CoinMarketCapClient::new("key".to_string(), base_url, Duration::from_secs(5))
                    .unwrap();

            let symbols = vec!["BTC".to_string(), "NOPE".to_string(), "ETH".to_string()];
            let ids = client.fetch_id_map(&symbols).await;

            assert_eq!(ids.len(), 2);
            assert_eq!(ids["BTC"], 1);
            assert_eq!(ids["ETH"], 1027);
            assert_eq!(id_label(&ids, "NOPE"), MISSING_ID);
        });
    }

    #[test]
    fn test_unreachable_host_yields_sentinels() {
        let client = CoinMarketCapClient::new(
            "key".to_string(),
            "http://127.0.0.1:1/v1/".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();

        tokio_test::block_on(async {
            assert!(client.fetch_market_data(50).await.is_none());
            assert!(client.fetch_top_cryptos(10).await.is_empty());
            assert!(client.fetch_id_map(&["BTC".to_string()]).await.is_empty());
        });
    }
}

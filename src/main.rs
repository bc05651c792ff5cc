use coinscout::config::Config;
use coinscout::display::{render_signals, render_top_cryptos};
use coinscout::sources::{CoinMarketCapClient, CoinbaseClient};
use coinscout::{run_scan, ReportWriter};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> coinscout::Result<()> {
    let config = Config::from_env()?;

    let coinbase = CoinbaseClient::from_config(&config)?;
    let cmc = CoinMarketCapClient::from_config(&config)?;
    let writer = ReportWriter::new(config.output_path.clone());

    info!("Fetching list of Coinbase-supported coins...");
    let tradable = coinbase.fetch_tradable_symbols().await;

    // Later calls are skipped once an input is missing; run_scan reports which.
    let market_data = if tradable.is_empty() {
        None
    } else {
        info!("Fetching top {} cryptocurrencies from CoinMarketCap...", config.listing_limit);
        cmc.fetch_market_data(config.listing_limit).await
    };

    let top_cryptos = match &market_data {
        Some(data) if !data.is_empty() => {
            info!("Fetching top {} cryptos by market cap...", config.top_limit);
            cmc.fetch_top_cryptos(config.top_limit).await
        }
        _ => Vec::new(),
    };

    info!("Analyzing data (only for Coinbase-supported coins)...");
    let report = run_scan(&tradable, market_data, top_cryptos, &writer)?;

    let symbols: Vec<String> = report.buy_signals.iter().map(|s| s.symbol.clone()).collect();
    let ids = cmc.fetch_id_map(&symbols).await;

    print!("{}", render_top_cryptos(&report.top_10_cryptos));
    print!("{}", render_signals(&report, &ids));
    println!("\nSuccessfully wrote buy signals to {}", writer.path().display());

    Ok(())
}

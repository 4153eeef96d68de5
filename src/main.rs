use anyhow::Context;
use krakenx::core::config::ExchangeConfig;
use krakenx::exchanges::{kraken_futures, kraken_spot};
use krakenx::{ExchangeError, FuturesMarketDataSource, SpotMarketDataSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let spot = kraken_spot::build_connector(ExchangeConfig::from_env("KRAKEN_SPOT")?)?;
    let futures = kraken_futures::build_connector(ExchangeConfig::from_env("KRAKEN_FUTURES")?)?;

    let time = spot
        .get_server_time()
        .await
        .context("fetching spot server time")?;
    println!("Spot server time: {} ({})", time.rfc1123, time.unixtime);

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "PF_XBTUSD".to_string());
    match futures.get_ticker(&symbol).await {
        Ok(ticker) => {
            let show = |value: Option<rust_decimal::Decimal>| {
                value.map_or_else(|| "-".to_string(), |v| v.to_string())
            };
            println!(
                "{}: last {} mark {} bid {} ask {} funding {}",
                ticker.symbol,
                show(ticker.last),
                show(ticker.mark_price),
                show(ticker.bid),
                show(ticker.ask),
                show(ticker.funding_rate),
            );
        }
        Err(ExchangeError::Api(api)) => {
            println!("Kraken rejected {}: {}", symbol, api.messages.join(", "));
        }
        Err(e) => return Err(e).context("fetching futures ticker"),
    }

    Ok(())
}

use crate::core::errors::ExchangeError;
use crate::core::kernel::{EnvelopeCodec, QueryParams, RestClient};
use crate::exchanges::kraken_spot::codec::KrakenSpotCodec;
use serde_json::Value;
use tracing::instrument;

/// Thin typed wrapper around `RestClient` for the spot public API
///
/// Every method returns the envelope's `result` payload; mapping it to domain
/// types is the market data component's job.
#[derive(Debug, Clone)]
pub struct KrakenSpotRestClient<R: RestClient> {
    client: R,
    codec: KrakenSpotCodec,
}

impl<R: RestClient> KrakenSpotRestClient<R> {
    pub fn new(client: R) -> Self {
        Self {
            client,
            codec: KrakenSpotCodec,
        }
    }

    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<Value, ExchangeError> {
        let body = self.client.get(endpoint, &params.as_pairs()).await?;
        self.codec.decode(&body)
    }

    pub async fn get_server_time(&self) -> Result<Value, ExchangeError> {
        self.fetch("/public/Time", &QueryParams::new()).await
    }

    pub async fn get_system_status(&self) -> Result<Value, ExchangeError> {
        self.fetch("/public/SystemStatus", &QueryParams::new()).await
    }

    /// `assets` is sent comma-joined; empty means every asset
    pub async fn get_assets(&self, assets: &[&str]) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().with_opt_str("asset", Some(assets.join(",").as_str()));
        self.fetch("/public/Assets", &params).await
    }

    /// `pairs` is sent comma-joined; empty means every pair
    pub async fn get_asset_pairs(&self, pairs: &[&str]) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().with_opt_str("pair", Some(pairs.join(",").as_str()));
        self.fetch("/public/AssetPairs", &params).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    pub async fn get_ticker(&self, pair: &str) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().with("pair", pair);
        self.fetch("/public/Ticker", &params).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    pub async fn get_depth(&self, pair: &str, count: Option<u32>) -> Result<Value, ExchangeError> {
        let params = QueryParams::new()
            .with("pair", pair)
            .with_opt_count("count", count);
        self.fetch("/public/Depth", &params).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    pub async fn get_trades(
        &self,
        pair: &str,
        since: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let params = QueryParams::new()
            .with("pair", pair)
            .with_opt_str("since", since)
            .with_opt_count("count", count);
        self.fetch("/public/Trades", &params).await
    }
}

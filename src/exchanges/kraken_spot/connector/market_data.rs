use crate::core::{
    errors::{DecodeError, ExchangeError},
    kernel::RestClient,
    traits::OrderBookSource,
    types::{OrderBook, TradeHistory},
};
use crate::exchanges::kraken_spot::{
    conversions::{
        convert_asset_info, convert_asset_pair, convert_asset_pairs, convert_order_book,
        convert_server_time, convert_system_status, convert_ticker, convert_trades, take_entry,
    },
    rest::KrakenSpotRestClient,
    traits::SpotMarketDataSource,
    types::{
        KrakenSpotAssetInfo, KrakenSpotAssetPair, KrakenSpotServerTime, KrakenSpotSystemStatus,
        SpotTicker,
    },
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Market data implementation for Kraken spot
pub struct MarketData<R: RestClient> {
    rest: KrakenSpotRestClient<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: KrakenSpotRestClient::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> SpotMarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_server_time(&self) -> Result<KrakenSpotServerTime, ExchangeError> {
        let payload = self.rest.get_server_time().await?;
        Ok(convert_server_time(payload)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_system_status(&self) -> Result<KrakenSpotSystemStatus, ExchangeError> {
        let payload = self.rest.get_system_status().await?;
        Ok(convert_system_status(payload)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_asset_info(
        &self,
        assets: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetInfo>, ExchangeError> {
        let payload = self.rest.get_assets(assets).await?;
        let assets = convert_asset_info(payload)?;
        debug!(count = assets.len(), "decoded asset info");
        Ok(assets)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_asset(&self, asset: &str) -> Result<KrakenSpotAssetInfo, ExchangeError> {
        let payload = self.rest.get_assets(&[asset]).await?;
        let entry = take_entry(payload, asset)?;
        Ok(serde_json::from_value(entry).map_err(DecodeError::from)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_asset_pairs(
        &self,
        pairs: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetPair>, ExchangeError> {
        let payload = self.rest.get_asset_pairs(pairs).await?;
        let pairs = convert_asset_pairs(payload)?;
        debug!(count = pairs.len(), "decoded asset pairs");
        Ok(pairs)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_asset_pair(&self, pair: &str) -> Result<KrakenSpotAssetPair, ExchangeError> {
        let payload = self.rest.get_asset_pairs(&[pair]).await?;
        let entry = take_entry(payload, pair)?;
        Ok(convert_asset_pair(entry)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_ticker(&self, pair: &str) -> Result<SpotTicker, ExchangeError> {
        let payload = self.rest.get_ticker(pair).await?;
        convert_ticker(pair, payload)
    }

    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_trades(
        &self,
        pair: &str,
        since: Option<&str>,
        count: Option<u32>,
    ) -> Result<TradeHistory, ExchangeError> {
        let payload = self.rest.get_trades(pair, since, count).await?;
        let history = convert_trades(pair, payload)?;
        debug!(trades = history.trades.len(), last = %history.last, "decoded trades");
        Ok(history)
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderBookSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "kraken_spot"))]
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let payload = self.rest.get_depth(symbol, depth).await?;
        convert_order_book(symbol, payload)
    }
}

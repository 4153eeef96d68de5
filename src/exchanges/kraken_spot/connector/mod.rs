use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderBookSource;
use crate::core::types::{OrderBook, TradeHistory};
use crate::exchanges::kraken_spot::traits::SpotMarketDataSource;
use crate::exchanges::kraken_spot::types::{
    KrakenSpotAssetInfo, KrakenSpotAssetPair, KrakenSpotServerTime, KrakenSpotSystemStatus,
    SpotTicker,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub mod market_data;

pub use market_data::MarketData;

/// Kraken spot connector composing the sub-trait implementations
pub struct KrakenSpotConnector<R: RestClient> {
    pub market: MarketData<R>,
}

impl<R: RestClient + Clone> KrakenSpotConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> SpotMarketDataSource for KrakenSpotConnector<R> {
    async fn get_server_time(&self) -> Result<KrakenSpotServerTime, ExchangeError> {
        self.market.get_server_time().await
    }

    async fn get_system_status(&self) -> Result<KrakenSpotSystemStatus, ExchangeError> {
        self.market.get_system_status().await
    }

    async fn get_asset_info(
        &self,
        assets: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetInfo>, ExchangeError> {
        self.market.get_asset_info(assets).await
    }

    async fn get_asset(&self, asset: &str) -> Result<KrakenSpotAssetInfo, ExchangeError> {
        self.market.get_asset(asset).await
    }

    async fn get_asset_pairs(
        &self,
        pairs: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetPair>, ExchangeError> {
        self.market.get_asset_pairs(pairs).await
    }

    async fn get_asset_pair(&self, pair: &str) -> Result<KrakenSpotAssetPair, ExchangeError> {
        self.market.get_asset_pair(pair).await
    }

    async fn get_ticker(&self, pair: &str) -> Result<SpotTicker, ExchangeError> {
        self.market.get_ticker(pair).await
    }

    async fn get_trades(
        &self,
        pair: &str,
        since: Option<&str>,
        count: Option<u32>,
    ) -> Result<TradeHistory, ExchangeError> {
        self.market.get_trades(pair, since, count).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderBookSource for KrakenSpotConnector<R> {
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(symbol, depth).await
    }
}

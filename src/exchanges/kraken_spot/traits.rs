use crate::core::{errors::ExchangeError, traits::OrderBookSource, types::TradeHistory};
use crate::exchanges::kraken_spot::types::{
    KrakenSpotAssetInfo, KrakenSpotAssetPair, KrakenSpotServerTime, KrakenSpotSystemStatus,
    SpotTicker,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Public spot market data
#[async_trait]
pub trait SpotMarketDataSource: OrderBookSource {
    async fn get_server_time(&self) -> Result<KrakenSpotServerTime, ExchangeError>;

    async fn get_system_status(&self) -> Result<KrakenSpotSystemStatus, ExchangeError>;

    /// All assets, or only `assets` when the slice is non-empty
    async fn get_asset_info(
        &self,
        assets: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetInfo>, ExchangeError>;

    async fn get_asset(&self, asset: &str) -> Result<KrakenSpotAssetInfo, ExchangeError>;

    /// All asset pairs, or only `pairs` when the slice is non-empty
    async fn get_asset_pairs(
        &self,
        pairs: &[&str],
    ) -> Result<BTreeMap<String, KrakenSpotAssetPair>, ExchangeError>;

    async fn get_asset_pair(&self, pair: &str) -> Result<KrakenSpotAssetPair, ExchangeError>;

    async fn get_ticker(&self, pair: &str) -> Result<SpotTicker, ExchangeError>;

    /// Trades after the `since` cursor (all recent trades when unset)
    async fn get_trades(
        &self,
        pair: &str,
        since: Option<&str>,
        count: Option<u32>,
    ) -> Result<TradeHistory, ExchangeError>;
}

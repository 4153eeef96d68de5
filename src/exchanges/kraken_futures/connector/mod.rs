use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{FundingRateSource, OrderBookSource};
use crate::core::types::{FundingRate, FuturesTrade, OrderBook};
use crate::exchanges::kraken_futures::traits::FuturesMarketDataSource;
use crate::exchanges::kraken_futures::types::{
    KrakenFuturesInstrument, KrakenFuturesInstrumentStatus, KrakenFuturesTicker,
};
use async_trait::async_trait;

pub mod market_data;

pub use market_data::MarketData;

/// Kraken futures connector composing the sub-trait implementations
pub struct KrakenFuturesConnector<R: RestClient> {
    pub market: MarketData<R>,
}

impl<R: RestClient + Clone> KrakenFuturesConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> FuturesMarketDataSource for KrakenFuturesConnector<R> {
    async fn get_instruments(&self) -> Result<Vec<KrakenFuturesInstrument>, ExchangeError> {
        self.market.get_instruments().await
    }

    async fn get_instrument(
        &self,
        symbol: &str,
    ) -> Result<KrakenFuturesInstrument, ExchangeError> {
        self.market.get_instrument(symbol).await
    }

    async fn get_instrument_status(
        &self,
        symbol: &str,
    ) -> Result<KrakenFuturesInstrumentStatus, ExchangeError> {
        self.market.get_instrument_status(symbol).await
    }

    async fn get_ticker(&self, symbol: &str) -> Result<KrakenFuturesTicker, ExchangeError> {
        self.market.get_ticker(symbol).await
    }

    async fn get_tickers(&self) -> Result<Vec<KrakenFuturesTicker>, ExchangeError> {
        self.market.get_tickers().await
    }

    async fn get_trade_history(
        &self,
        symbol: &str,
        last_time: Option<&str>,
    ) -> Result<Vec<FuturesTrade>, ExchangeError> {
        self.market.get_trade_history(symbol, last_time).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderBookSource for KrakenFuturesConnector<R> {
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(symbol, depth).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> FundingRateSource for KrakenFuturesConnector<R> {
    async fn get_funding_rate_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<FundingRate>, ExchangeError> {
        self.market.get_funding_rate_history(symbol).await
    }
}

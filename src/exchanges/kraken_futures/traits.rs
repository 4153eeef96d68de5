use crate::core::{
    errors::ExchangeError,
    traits::{FundingRateSource, OrderBookSource},
    types::FuturesTrade,
};
use crate::exchanges::kraken_futures::types::{
    KrakenFuturesInstrument, KrakenFuturesInstrumentStatus, KrakenFuturesTicker,
};
use async_trait::async_trait;

/// Public futures market data
#[async_trait]
pub trait FuturesMarketDataSource: OrderBookSource + FundingRateSource {
    async fn get_instruments(&self) -> Result<Vec<KrakenFuturesInstrument>, ExchangeError>;

    async fn get_instrument(&self, symbol: &str)
        -> Result<KrakenFuturesInstrument, ExchangeError>;

    async fn get_instrument_status(
        &self,
        symbol: &str,
    ) -> Result<KrakenFuturesInstrumentStatus, ExchangeError>;

    async fn get_ticker(&self, symbol: &str) -> Result<KrakenFuturesTicker, ExchangeError>;

    async fn get_tickers(&self) -> Result<Vec<KrakenFuturesTicker>, ExchangeError>;

    /// Trades before `last_time` (most recent trades when unset)
    async fn get_trade_history(
        &self,
        symbol: &str,
        last_time: Option<&str>,
    ) -> Result<Vec<FuturesTrade>, ExchangeError>;
}

use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::{FundingRateSource, OrderBookSource},
    types::{FundingRate, FuturesTrade, OrderBook},
};
use crate::exchanges::kraken_futures::{
    conversions::{
        convert_funding_rates, convert_instrument_status, convert_instruments, convert_order_book,
        convert_ticker, convert_tickers, convert_trade_history, find_instrument,
    },
    rest::KrakenFuturesRestClient,
    traits::FuturesMarketDataSource,
    types::{KrakenFuturesInstrument, KrakenFuturesInstrumentStatus, KrakenFuturesTicker},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Market data implementation for Kraken futures
pub struct MarketData<R: RestClient> {
    rest: KrakenFuturesRestClient<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: KrakenFuturesRestClient::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> FuturesMarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_instruments(&self) -> Result<Vec<KrakenFuturesInstrument>, ExchangeError> {
        let payload = self.rest.get_instruments().await?;
        let instruments = convert_instruments(payload)?;
        debug!(count = instruments.len(), "decoded instruments");
        Ok(instruments)
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_instrument(
        &self,
        symbol: &str,
    ) -> Result<KrakenFuturesInstrument, ExchangeError> {
        let payload = self.rest.get_instruments().await?;
        find_instrument(convert_instruments(payload)?, symbol)
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_instrument_status(
        &self,
        symbol: &str,
    ) -> Result<KrakenFuturesInstrumentStatus, ExchangeError> {
        let payload = self.rest.get_instrument_status(symbol).await?;
        Ok(convert_instrument_status(payload)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_ticker(&self, symbol: &str) -> Result<KrakenFuturesTicker, ExchangeError> {
        let payload = self.rest.get_ticker(symbol).await?;
        Ok(convert_ticker(payload)?)
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_tickers(&self) -> Result<Vec<KrakenFuturesTicker>, ExchangeError> {
        let payload = self.rest.get_tickers().await?;
        let tickers = convert_tickers(payload)?;
        debug!(count = tickers.len(), "decoded tickers");
        Ok(tickers)
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_trade_history(
        &self,
        symbol: &str,
        last_time: Option<&str>,
    ) -> Result<Vec<FuturesTrade>, ExchangeError> {
        let payload = self.rest.get_history(symbol, last_time).await?;
        let trades = convert_trade_history(payload)?;
        debug!(count = trades.len(), "decoded trade history");
        Ok(trades)
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderBookSource for MarketData<R> {
    /// The futures endpoint always returns the full book; `depth` trims it
    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let payload = self.rest.get_order_book(symbol).await?;
        Ok(convert_order_book(symbol, payload, depth)?)
    }
}

#[async_trait]
impl<R: RestClient + Clone> FundingRateSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    async fn get_funding_rate_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<FundingRate>, ExchangeError> {
        let payload = self.rest.get_historical_funding_rates(symbol).await?;
        let rates = convert_funding_rates(symbol, payload)?;
        debug!(count = rates.len(), "decoded funding rates");
        Ok(rates)
    }
}

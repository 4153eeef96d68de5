use crate::core::{
    errors::ExchangeError,
    types::{FundingRate, OrderBook},
};
use async_trait::async_trait;

/// Order book access shared by both product lines
#[async_trait]
pub trait OrderBookSource {
    /// `depth` of `None` or zero leaves the level count to the exchange
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError>;
}

#[async_trait]
pub trait FundingRateSource {
    async fn get_funding_rate_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<FundingRate>, ExchangeError>;
}

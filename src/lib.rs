pub mod core;
pub mod exchanges;

pub use core::{
    config::ExchangeConfig,
    errors::{ApiError, DecodeError, ExchangeError},
    traits::{FundingRateSource, OrderBookSource},
    types::*,
};
pub use exchanges::kraken_futures::{FuturesMarketDataSource, KrakenFuturesConnector};
pub use exchanges::kraken_spot::{KrakenSpotConnector, SpotMarketDataSource};

// Core modules - one responsibility per file
pub mod codec; // impl EnvelopeCodec (result/error/errors envelope)
pub mod conversions; // payload -> domain mappers
pub mod rest; // thin typed wrapper around RestClient
pub mod traits; // product-line market data trait
pub mod types; // serde structs and positional records

pub mod builder;
pub mod connector;

pub use builder::{build_connector, FUTURES_BASE_URL, FUTURES_DEMO_BASE_URL};
pub use codec::KrakenFuturesCodec;
pub use connector::KrakenFuturesConnector;
pub use rest::KrakenFuturesRestClient;
pub use traits::FuturesMarketDataSource;
pub use types::*;

// Core modules - one responsibility per file
pub mod codec; // impl EnvelopeCodec (spot error/result envelope)
pub mod conversions; // payload -> domain mappers
pub mod rest; // thin typed wrapper around RestClient
pub mod traits; // product-line market data trait
pub mod types; // serde structs and positional records

pub mod builder;
pub mod connector;

pub use builder::{build_connector, SPOT_BASE_URL};
pub use codec::KrakenSpotCodec;
pub use connector::KrakenSpotConnector;
pub use rest::KrakenSpotRestClient;
pub use traits::SpotMarketDataSource;
pub use types::*;

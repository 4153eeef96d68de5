/// Kernel - exchange-agnostic transport and decoding building blocks
///
/// The kernel holds no product-specific logic. Product modules plug into it
/// through two seams:
///
/// ## Transport
/// - `RestClient`: GET a path and return the raw body
/// - `ReqwestRest`: reqwest implementation with a per-request deadline
///
/// ## Decoding
/// - `EnvelopeCodec`: product-specific success/error envelope handling
/// - `tuple`: schema-driven decoding of positional JSON arrays
///
/// # Example
/// ```rust,no_run
/// use krakenx::core::kernel::*;
/// use krakenx::exchanges::kraken_spot::codec::KrakenSpotCodec;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest_config = RestClientConfig::new(
///     "https://api.kraken.com/0".to_string(),
///     "kraken_spot".to_string(),
/// );
/// let rest = RestClientBuilder::new(rest_config).build()?;
///
/// let body = rest.get("/public/Time", &[]).await?;
/// let result = KrakenSpotCodec.decode(&body)?;
/// println!("{}", result);
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod tuple;

pub use codec::EnvelopeCodec;
pub use rest::{QueryParams, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use tuple::{DecodedTuple, SlotKind, TupleRecord, TupleSchema};

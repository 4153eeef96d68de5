use crate::core::errors::ExchangeError;
use crate::core::kernel::{EnvelopeCodec, QueryParams, RestClient};
use crate::exchanges::kraken_futures::codec::KrakenFuturesCodec;
use crate::exchanges::kraken_futures::types::FuturesPayload;
use tracing::instrument;

const API_PREFIX: &str = "/derivatives/api/v3";

/// Thin typed wrapper around `RestClient` for the futures public API
#[derive(Debug, Clone)]
pub struct KrakenFuturesRestClient<R: RestClient> {
    client: R,
    codec: KrakenFuturesCodec,
}

impl<R: RestClient> KrakenFuturesRestClient<R> {
    pub fn new(client: R) -> Self {
        Self {
            client,
            codec: KrakenFuturesCodec,
        }
    }

    async fn fetch(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<FuturesPayload, ExchangeError> {
        let endpoint = format!("{}{}", API_PREFIX, path);
        let body = self.client.get(&endpoint, &params.as_pairs()).await?;
        self.codec.decode(&body)
    }

    pub async fn get_instruments(&self) -> Result<FuturesPayload, ExchangeError> {
        self.fetch("/instruments", &QueryParams::new()).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    pub async fn get_instrument_status(
        &self,
        symbol: &str,
    ) -> Result<FuturesPayload, ExchangeError> {
        let path = format!("/instruments/{}/status", path_symbol(symbol)?);
        self.fetch(&path, &QueryParams::new()).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    pub async fn get_ticker(&self, symbol: &str) -> Result<FuturesPayload, ExchangeError> {
        let path = format!("/tickers/{}", path_symbol(symbol)?);
        self.fetch(&path, &QueryParams::new()).await
    }

    pub async fn get_tickers(&self) -> Result<FuturesPayload, ExchangeError> {
        self.fetch("/tickers", &QueryParams::new()).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    pub async fn get_history(
        &self,
        symbol: &str,
        last_time: Option<&str>,
    ) -> Result<FuturesPayload, ExchangeError> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with_opt_str("lastTime", last_time);
        self.fetch("/history", &params).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    pub async fn get_order_book(&self, symbol: &str) -> Result<FuturesPayload, ExchangeError> {
        let params = QueryParams::new().with("symbol", symbol);
        self.fetch("/orderbook", &params).await
    }

    #[instrument(skip(self), fields(exchange = "kraken_futures"))]
    pub async fn get_historical_funding_rates(
        &self,
        symbol: &str,
    ) -> Result<FuturesPayload, ExchangeError> {
        let params = QueryParams::new().with("symbol", symbol);
        self.fetch("/historical-funding-rates", &params).await
    }
}

/// Percent-encode a symbol used as a path segment.
///
/// An empty symbol would silently turn `/tickers/{symbol}` into the all-tickers
/// endpoint, so it is rejected.
fn path_symbol(symbol: &str) -> Result<String, ExchangeError> {
    if symbol.is_empty() {
        return Err(ExchangeError::InvalidParameters(
            "symbol must not be empty".to_string(),
        ));
    }
    Ok(urlencoding::encode(symbol).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_symbol_encoding() {
        assert_eq!(path_symbol("PF_XBTUSD").unwrap(), "PF_XBTUSD");
        assert_eq!(path_symbol("PF XBT/USD").unwrap(), "PF%20XBT%2FUSD");
        assert!(matches!(
            path_symbol(""),
            Err(ExchangeError::InvalidParameters(_))
        ));
    }
}

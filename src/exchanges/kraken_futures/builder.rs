use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::kraken_futures::connector::KrakenFuturesConnector;

pub const FUTURES_BASE_URL: &str = "https://futures.kraken.com";
pub const FUTURES_DEMO_BASE_URL: &str = "https://demo-futures.kraken.com";

/// Create a Kraken futures connector backed by reqwest
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<KrakenFuturesConnector<ReqwestRest>, ExchangeError> {
    config.validate()?;

    let base_url = config.resolve_base_url(FUTURES_BASE_URL, Some(FUTURES_DEMO_BASE_URL));

    let rest_config = RestClientConfig::new(base_url, "kraken_futures".to_string())
        .with_timeout(config.timeout_seconds)
        .with_user_agent(config.user_agent.clone());

    let rest = RestClientBuilder::new(rest_config).build()?;

    Ok(KrakenFuturesConnector::new(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_connector_testnet() {
        assert!(build_connector(ExchangeConfig::new().testnet(true)).is_ok());
    }

    #[test]
    fn test_build_connector_rejects_invalid_config() {
        let result = build_connector(ExchangeConfig::new().timeout_seconds(0));
        assert!(matches!(result, Err(ExchangeError::ConfigError(_))));
    }
}

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::kraken_spot::connector::KrakenSpotConnector;

pub const SPOT_BASE_URL: &str = "https://api.kraken.com/0";

/// Create a Kraken spot connector backed by reqwest
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<KrakenSpotConnector<ReqwestRest>, ExchangeError> {
    config.validate()?;

    // spot has no public demo environment, `testnet` is ignored
    let base_url = config.resolve_base_url(SPOT_BASE_URL, None);

    let rest_config = RestClientConfig::new(base_url, "kraken_spot".to_string())
        .with_timeout(config.timeout_seconds)
        .with_user_agent(config.user_agent.clone());

    let rest = RestClientBuilder::new(rest_config).build()?;

    Ok(KrakenSpotConnector::new(rest))
}

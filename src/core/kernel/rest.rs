use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{instrument, trace, warn};

/// REST transport for public GET endpoints
///
/// Implementations only move bytes: they know nothing about envelopes or
/// payload shapes. Dropping the returned future cancels the request.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request and return the raw response body
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path, appended to the base URL
    /// * `query_params` - Query parameters as key-value pairs
    async fn get(&self, endpoint: &str, query_params: &[(&str, &str)])
        -> Result<Vec<u8>, ExchangeError>;
}

/// Query parameters for a request, skipping optional values that are unset
///
/// Empty strings and zero counts are treated as "not provided" and never
/// sent as empty values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn with_opt_str(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.with(key, value),
            _ => self,
        }
    }

    #[must_use]
    pub fn with_opt_count(self, key: &'static str, value: Option<u32>) -> Self {
        match value {
            Some(value) if value > 0 => self.with(key, value.to_string()),
            _ => self,
        }
    }

    /// Borrowed view in the shape [`RestClient::get`] expects
    pub fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request deadline in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            user_agent: "krakenx/0.1".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn new(base_url: String, exchange_name: String) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(base_url, exchange_name)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Read the body whatever the status: Kraken reports failures inside it
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Vec<u8>, ExchangeError> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", String::from_utf8_lossy(&body));

        if !status.is_success() {
            warn!(status = %status, "non-success HTTP status, decoding body anyway");
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let url = self.build_url(endpoint);
        let mut request = self.client.get(&url);
        if !query_params.is_empty() {
            request = request.query(query_params);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_unset_optionals() {
        let params = QueryParams::new()
            .with("pair", "XBTUSD")
            .with_opt_str("since", Some(""))
            .with_opt_str("lastTime", None)
            .with_opt_count("count", Some(0));

        assert_eq!(params.as_pairs(), vec![("pair", "XBTUSD")]);
    }

    #[test]
    fn test_query_params_keep_set_optionals() {
        let params = QueryParams::new()
            .with("pair", "XBTUSD")
            .with_opt_str("since", Some("1690000000"))
            .with_opt_count("count", Some(25));

        assert_eq!(
            params.as_pairs(),
            vec![("pair", "XBTUSD"), ("since", "1690000000"), ("count", "25")]
        );
    }

    #[test]
    fn test_rest_client_creation() {
        let rest = RestClientBuilder::new(
            RestClientConfig::new("https://api.kraken.com/0".to_string(), "kraken".to_string())
                .with_timeout(5),
        )
        .build()
        .unwrap();

        assert_eq!(rest.config().timeout_seconds, 5);
        assert_eq!(rest.build_url("/public/Time"), "https://api.kraken.com/0/public/Time");
    }
}

use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "krakenx/0.1";

/// Connection settings shared by the spot and futures connectors.
///
/// Only public endpoints are supported, so there are no credentials here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Use the exchange's demo environment where one exists (futures only)
    #[serde(default)]
    pub testnet: bool,
    /// Overrides the product's default base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request deadline enforced by the transport
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            testnet: false,
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Recognised variables (all optional):
    /// - `{PREFIX}_BASE_URL`
    /// - `{PREFIX}_TESTNET` (defaults to false)
    /// - `{PREFIX}_TIMEOUT_SECONDS` (defaults to 30)
    /// - `{PREFIX}_USER_AGENT`
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let mut config = Self::new();

        if let Ok(base_url) = env::var(format!("{}_BASE_URL", prefix)) {
            if !base_url.is_empty() {
                config.base_url = Some(base_url);
            }
        }

        config.testnet = env::var(format!("{}_TESTNET", prefix))
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let timeout_var = format!("{}_TIMEOUT_SECONDS", prefix);
        if let Ok(raw) = env::var(&timeout_var) {
            config.timeout_seconds = raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    timeout_var, raw
                ))
            })?;
        }

        if let Ok(user_agent) = env::var(format!("{}_USER_AGENT", prefix)) {
            config.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a `.env` file (if present) and then read the environment
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Same as [`Self::from_env_file`] with an explicit file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no file, fall through to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Set testnet mode
    #[must_use]
    pub const fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL override if set, otherwise the testnet or production default
    pub fn resolve_base_url(&self, production: &str, testnet: Option<&str>) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.trim_end_matches('/').to_string();
        }
        match (self.testnet, testnet) {
            (true, Some(url)) => url.to_string(),
            _ => production.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "base_url must be an http(s) URL, got '{}'",
                    base_url
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

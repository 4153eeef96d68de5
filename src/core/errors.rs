use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("No entry found for key: {key}")]
    NotFound { key: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Messages reported by the exchange, if this is an API error
    pub fn api_messages(&self) -> Option<&[String]> {
        match self {
            Self::Api(api) => Some(&api.messages),
            _ => None,
        }
    }

    /// True for failures raised before a response body was obtained
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::NetworkError(_))
    }
}

/// Failure reported explicitly by the exchange.
///
/// Both the spot `error` array and the futures `error`/`errors` fields
/// normalize into this shape. `messages` is never empty; the first entry is
/// the primary message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .messages.join("; "))]
pub struct ApiError {
    pub messages: Vec<String>,
}

impl ApiError {
    /// Returns `None` when there is nothing to report
    pub fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    pub fn primary(&self) -> &str {
        self.messages.first().map_or("", String::as_str)
    }
}

/// The payload did not have the shape the decoder expected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{schema}: expected {expected} slots, got {actual}")]
    Arity {
        schema: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{schema}: slot {index} expected {expected}, got {actual}")]
    TypeMismatch {
        schema: &'static str,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unexpected value for {field}: {value}")]
    UnexpectedValue { field: String, value: String },
}

impl DecodeError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn unexpected(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::UnexpectedValue {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson(err.to_string())
    }
}

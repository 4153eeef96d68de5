use crate::core::errors::{ApiError, DecodeError};
use crate::core::kernel::EnvelopeCodec;
use crate::exchanges::kraken_futures::types::{FuturesPayload, KrakenFuturesEnvelope};
use serde_json::Value;
use tracing::warn;

const RESULT_SUCCESS: &str = "success";
const RESULT_ERROR: &str = "error";

/// Futures envelope codec.
///
/// Success: `{"result": "success", "serverTime": "...", <payload fields>}`.
/// Failure: `{"result": "error", "error": "...", "errors": [...]}`; the single
/// `error` comes first, followed by every `errors` entry in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KrakenFuturesCodec;

impl EnvelopeCodec for KrakenFuturesCodec {
    type Envelope = KrakenFuturesEnvelope;
    type Payload = FuturesPayload;

    fn name(&self) -> &'static str {
        "kraken_futures"
    }

    fn parse_envelope(&self, body: &[u8]) -> Result<Self::Envelope, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    fn normalize_error(&self, envelope: &Self::Envelope) -> Result<Option<ApiError>, DecodeError> {
        match envelope.result.as_deref() {
            Some(RESULT_SUCCESS) => {
                let has_errors = envelope.errors.as_ref().is_some_and(|e| !e.is_empty());
                if envelope.error.is_some() || has_errors {
                    warn!(codec = self.name(), "success envelope carries error fields");
                }
                Ok(None)
            }
            Some(RESULT_ERROR) => {
                let messages = error_messages(envelope);
                ApiError::from_messages(messages)
                    .map(Some)
                    .ok_or_else(|| DecodeError::missing("error"))
            }
            Some(other) => Err(DecodeError::unexpected("result", other)),
            None => Err(DecodeError::missing("result")),
        }
    }

    fn into_payload(&self, envelope: Self::Envelope) -> Result<Self::Payload, DecodeError> {
        Ok(FuturesPayload {
            server_time: envelope.server_time,
            fields: envelope.payload,
        })
    }
}

fn error_messages(envelope: &KrakenFuturesEnvelope) -> Vec<String> {
    // an empty `error` is still a reported failure and is kept as-is
    let single = envelope.error.iter().cloned();

    // entries are usually strings but anything else is kept in its JSON form
    let listed = envelope.errors.iter().flatten().map(|entry| match entry {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    });

    single.chain(listed).collect()
}

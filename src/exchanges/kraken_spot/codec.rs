use crate::core::errors::{ApiError, DecodeError};
use crate::core::kernel::EnvelopeCodec;
use crate::exchanges::kraken_spot::types::KrakenSpotEnvelope;
use serde_json::Value;

/// Spot envelope codec.
///
/// Success: `{"error": [], "result": <payload>}`.
/// Failure: `{"error": ["EQuery:Unknown asset pair", ...]}`; every message is
/// kept, the first one being the primary message.
#[derive(Debug, Clone, Copy, Default)]
pub struct KrakenSpotCodec;

impl EnvelopeCodec for KrakenSpotCodec {
    type Envelope = KrakenSpotEnvelope;
    type Payload = Value;

    fn name(&self) -> &'static str {
        "kraken_spot"
    }

    fn parse_envelope(&self, body: &[u8]) -> Result<Self::Envelope, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    fn normalize_error(&self, envelope: &Self::Envelope) -> Result<Option<ApiError>, DecodeError> {
        let errors = envelope
            .error
            .as_ref()
            .ok_or_else(|| DecodeError::missing("error"))?;
        Ok(ApiError::from_messages(errors.clone()))
    }

    fn into_payload(&self, envelope: Self::Envelope) -> Result<Self::Payload, DecodeError> {
        envelope.result.ok_or_else(|| DecodeError::missing("result"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ExchangeError;
    use serde_json::json;

    fn decode(body: &str) -> Result<Value, ExchangeError> {
        KrakenSpotCodec.decode(body.as_bytes())
    }

    #[test]
    fn test_success_yields_result_unchanged() {
        let payload = decode(r#"{"error":[],"result":{"unixtime":1690000000,"rfc1123":"x"}}"#)
            .unwrap();
        assert_eq!(payload, json!({"unixtime": 1690000000, "rfc1123": "x"}));
    }

    #[test]
    fn test_error_array_becomes_api_error() {
        let err = decode(r#"{"error":["EQuery:Unknown asset pair"]}"#).unwrap_err();
        assert_eq!(
            err.api_messages().unwrap(),
            &["EQuery:Unknown asset pair".to_string()]
        );
    }

    #[test]
    fn test_all_error_messages_are_kept_regardless_of_result() {
        let err = decode(r#"{"error":["EGeneral:Too many requests","EAPI:Rate limit exceeded"],"result":{"ignored":true}}"#)
            .unwrap_err();
        match err {
            ExchangeError::Api(api) => {
                assert_eq!(api.primary(), "EGeneral:Too many requests");
                assert_eq!(api.messages.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_result_is_decode_failure() {
        let err = decode(r#"{"error":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::Decode(DecodeError::MissingField(ref field)) if field == "result"
        ));
    }

    #[test]
    fn test_missing_error_field_is_decode_failure() {
        let err = decode(r#"{"result":{}}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(DecodeError::MissingField(_))));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(DecodeError::MalformedJson(_))));

        // error entries must be strings
        let err = decode(r#"{"error":[42],"result":{}}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(DecodeError::MalformedJson(_))));
    }
}

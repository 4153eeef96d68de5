use crate::core::errors::{ApiError, DecodeError, ExchangeError};
use tracing::debug;

/// Codec trait for a product line's REST response envelope
///
/// Each product wraps its payloads differently and signals failure
/// differently. An implementation parses the raw body into its envelope type,
/// normalizes any reported failure into an [`ApiError`], and otherwise hands
/// back the payload untouched. Field-level validation of the payload is left
/// to the domain mappers.
pub trait EnvelopeCodec: Send + Sync + 'static {
    /// Parsed top-level wrapper
    type Envelope;

    /// What a successful envelope carries
    type Payload;

    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Parse the raw response body into the envelope type
    fn parse_envelope(&self, body: &[u8]) -> Result<Self::Envelope, DecodeError>;

    /// Collapse the product's error convention into one [`ApiError`]
    ///
    /// # Returns
    /// - `Ok(Some(error))` - the exchange reported a failure
    /// - `Ok(None)` - the envelope signals success
    /// - `Err(error)` - the envelope carries neither a payload nor an error
    fn normalize_error(&self, envelope: &Self::Envelope) -> Result<Option<ApiError>, DecodeError>;

    /// Extract the payload from an envelope already known to signal success
    fn into_payload(&self, envelope: Self::Envelope) -> Result<Self::Payload, DecodeError>;

    /// Full pipeline: parse, fail fast on a reported error, extract the payload
    fn decode(&self, body: &[u8]) -> Result<Self::Payload, ExchangeError> {
        let envelope = self.parse_envelope(body)?;
        if let Some(error) = self.normalize_error(&envelope)? {
            debug!(codec = self.name(), messages = ?error.messages, "exchange reported error");
            return Err(ExchangeError::Api(error));
        }
        Ok(self.into_payload(envelope)?)
    }
}

//! JSON codec for the request and response envelopes.
//!
//! The wire format is agreed with the host out-of-band: one
//! self-describing JSON document per framed message. Decoding never
//! silently defaults; malformed bytes are a hard protocol fault.

use thiserror::Error;

use wherry_plugin_api::{ExitCode, Request, Response};

/// Errors raised while encoding or decoding envelopes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The framed bytes did not decode into a valid request envelope.
    #[error("failed to decode request envelope: {source}")]
    DecodeRequest {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory response envelope could not be encoded. Not
    /// expected for well-formed values, but handled all the same.
    #[error("failed to encode response envelope: {source}")]
    EncodeResponse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    /// Maps the failure to its host-facing exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::DecodeRequest { .. } => ExitCode::FailedToUnmarshalRequest,
            Self::EncodeResponse { .. } => ExitCode::FailedToMarshalResponse,
        }
    }
}

/// Decodes a request envelope from framed payload bytes.
///
/// # Errors
///
/// Returns [`CodecError::DecodeRequest`] when the bytes are not a valid
/// envelope, including envelopes with unrecognised operation fields.
pub fn decode_request(payload: &[u8]) -> Result<Request, CodecError> {
    serde_json::from_slice(payload).map_err(|source| CodecError::DecodeRequest { source })
}

/// Encodes a response envelope into JSON bytes.
///
/// # Errors
///
/// Returns [`CodecError::EncodeResponse`] when serialisation fails.
pub fn encode_response(response: &Response) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(response).map_err(|source| CodecError::EncodeResponse { source })
}

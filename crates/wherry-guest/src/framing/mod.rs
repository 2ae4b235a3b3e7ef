//! Delimiter framing for messages on the guest's byte streams.
//!
//! The host and guest exchange discrete messages over continuous byte
//! streams by terminating every message with a single configured delimiter
//! byte. Each invocation carries exactly one framed request on stdin and
//! at most one framed response on stdout.

use std::io::{BufRead, BufReader, Read, Write};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use wherry_plugin_api::ExitCode;

/// Tracing target for framing operations.
const FRAMING_TARGET: &str = "wherry_guest::framing";

/// Errors raised while framing messages on the byte streams.
///
/// I/O errors are wrapped in `Arc` to satisfy the `result_large_err`
/// Clippy lint.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Reading from the input stream failed before a complete message
    /// was obtained.
    #[error("failed to read framed message: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The stream ended with unread bytes but no delimiter.
    #[error("framed message ended without the delimiter byte")]
    UnterminatedMessage,

    /// Writing the framed message to the output stream failed.
    #[error("failed to write framed message: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl FramingError {
    /// Maps the failure to its host-facing exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Read { .. } | Self::UnterminatedMessage => ExitCode::FailedToReadRequest,
            Self::Write { .. } => ExitCode::FailedToWriteResponse,
        }
    }
}

/// Reads one delimiter-terminated message from `input`.
///
/// Returns `Ok(None)` when the stream ends before any byte arrives: an
/// empty input is the host signalling "no request this invocation" and is
/// not an error. Otherwise the payload is returned with exactly the one
/// trailing delimiter byte stripped; the payload itself may be empty.
///
/// # Errors
///
/// Returns [`FramingError::Read`] when the underlying read fails and
/// [`FramingError::UnterminatedMessage`] when the stream ends with
/// payload bytes but no delimiter.
pub fn read_framed(input: impl Read, delimiter: u8) -> Result<Option<Vec<u8>>, FramingError> {
    let mut reader = BufReader::new(input);
    let mut message = Vec::new();
    let bytes_read = reader
        .read_until(delimiter, &mut message)
        .map_err(|err| FramingError::Read {
            source: Arc::new(err),
        })?;

    if bytes_read == 0 {
        debug!(target: FRAMING_TARGET, "input stream is empty, no request to read");
        return Ok(None);
    }

    if message.last() != Some(&delimiter) {
        return Err(FramingError::UnterminatedMessage);
    }
    message.pop();

    debug!(
        target: FRAMING_TARGET,
        payload_bytes = message.len(),
        "read framed message"
    );
    Ok(Some(message))
}

/// Writes `payload` terminated by the delimiter byte to `output`.
///
/// The payload and delimiter are combined into one buffer and written as
/// a single logical operation, then the stream is flushed.
///
/// # Errors
///
/// Returns [`FramingError::Write`] when the write or the flush fails.
pub fn write_framed(
    mut output: impl Write,
    delimiter: u8,
    payload: &[u8],
) -> Result<(), FramingError> {
    let mut framed = Vec::with_capacity(payload.len() + 1);
    framed.extend_from_slice(payload);
    framed.push(delimiter);

    output.write_all(&framed).map_err(|err| FramingError::Write {
        source: Arc::new(err),
    })?;
    output.flush().map_err(|err| FramingError::Write {
        source: Arc::new(err),
    })?;

    debug!(
        target: FRAMING_TARGET,
        payload_bytes = payload.len(),
        "wrote framed message"
    );
    Ok(())
}

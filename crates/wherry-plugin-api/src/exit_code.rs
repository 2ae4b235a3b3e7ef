//! Numeric status codes returned by the guest entry point.
//!
//! The host branches on the raw `u64` without parsing a response body, so
//! the numeric values are part of the wire contract and must never be
//! reordered.

/// Status of one guest invocation, as seen by the host.
///
/// Configuration and framing failures are fatal to the invocation and
/// surface here directly. Handler-level failures do not: they are folded
/// into the response envelope's issue list and the invocation still
/// reports [`ExitCode::Ok`].
///
/// # Example
///
/// ```
/// use wherry_plugin_api::ExitCode;
///
/// assert_eq!(u64::from(ExitCode::Ok), 0);
/// assert_eq!(ExitCode::PluginNotRegistered.to_string(), "no plugin registered");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// The invocation succeeded; the response stream holds a valid
    /// envelope (or was intentionally left untouched for an empty
    /// request).
    Ok,
    /// No handler was registered before the entry point ran.
    PluginNotRegistered,
    /// The input stream failed before a complete framed message arrived.
    FailedToReadRequest,
    /// The framed bytes did not decode into a valid request envelope.
    FailedToUnmarshalRequest,
    /// Handler failure signalled without the structured issues path.
    /// Reserved for the binary protocol generation; the JSON generation
    /// never returns it.
    PluginErr,
    /// The in-memory response envelope could not be encoded.
    FailedToMarshalResponse,
    /// The encoded response could not be written to the output stream.
    FailedToWriteResponse,
    /// The configured message delimiter was not exactly one byte.
    MessageDelimInvalid,
    /// The guest mount path was set without its host-side counterpart.
    CwdHostPathMissing,
}

impl ExitCode {
    /// Returns the numeric value carried back to the host.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        match self {
            Self::Ok => 0,
            Self::PluginNotRegistered => 1,
            Self::FailedToReadRequest => 2,
            Self::FailedToUnmarshalRequest => 3,
            Self::PluginErr => 4,
            Self::FailedToMarshalResponse => 5,
            Self::FailedToWriteResponse => 6,
            Self::MessageDelimInvalid => 7,
            Self::CwdHostPathMissing => 8,
        }
    }

    /// Returns the host-facing description of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::PluginNotRegistered => "no plugin registered",
            Self::FailedToReadRequest => "failed to read request",
            Self::FailedToUnmarshalRequest => "failed to unmarshal request",
            Self::PluginErr => "plugin error",
            Self::FailedToMarshalResponse => "failed to marshal response",
            Self::FailedToWriteResponse => "failed to write response",
            Self::MessageDelimInvalid => "message delimiter must be a single byte",
            Self::CwdHostPathMissing => "__CWD was set but not __CWD_HOST",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExitCode> for u64 {
    fn from(code: ExitCode) -> Self {
        code.as_u64()
    }
}

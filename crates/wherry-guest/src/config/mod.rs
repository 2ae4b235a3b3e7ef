//! Per-invocation configuration resolved from the host environment.
//!
//! The host configures each invocation through environment variables (see
//! `wherry-plugin-api` for the names). Resolution is a pure function of an
//! environment snapshot with no other side effects, and it runs fresh on
//! every invocation: the module instance may have been newly initialised
//! since the last request, so nothing is cached across invocations.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use wherry_plugin_api::{
    DEFAULT_MESSAGE_DELIMITER, ENV_CWD, ENV_CWD_HOST, ENV_MESSAGE_DELIMITER, ExitCode,
};

use crate::context::VolumeMount;

/// Errors raised while resolving the host-provided configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured message delimiter was not exactly one byte.
    #[error("message delimiter must be a single byte, got {actual} bytes")]
    DelimiterInvalid {
        /// Byte length of the configured value.
        actual: usize,
    },

    /// The guest mount path was set without its host-side counterpart.
    /// Partial mount configuration is always an error, never ignored.
    #[error("__CWD was set but not __CWD_HOST")]
    HostPathMissing,
}

impl ConfigError {
    /// Maps the failure to its host-facing exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::DelimiterInvalid { .. } => ExitCode::MessageDelimInvalid,
            Self::HostPathMissing => ExitCode::CwdHostPathMissing,
        }
    }
}

/// Host-provided configuration for one invocation.
///
/// # Example
///
/// ```
/// use wherry_guest::config::GuestConfig;
///
/// let config = GuestConfig::resolve_with(|_| None).expect("defaults resolve");
/// assert_eq!(config.message_delimiter(), b'\n');
/// assert!(config.mount().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestConfig {
    message_delimiter: u8,
    mount: Option<VolumeMount>,
}

impl GuestConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the delimiter is not exactly one
    /// byte or when the mount configuration is asymmetric.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(|name| env::var_os(name))
    }

    /// Resolves configuration from an arbitrary environment snapshot.
    ///
    /// The seam used by tests; [`GuestConfig::resolve`] passes the real
    /// process environment through it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DelimiterInvalid`] when the delimiter
    /// variable is set to anything but a single byte, and
    /// [`ConfigError::HostPathMissing`] when the guest mount path is set
    /// without the host-side path. A host path without a guest path is
    /// inert.
    pub fn resolve_with(
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let message_delimiter = match lookup(ENV_MESSAGE_DELIMITER) {
            None => DEFAULT_MESSAGE_DELIMITER,
            Some(value) => match value.as_encoded_bytes() {
                [single] => *single,
                other => {
                    return Err(ConfigError::DelimiterInvalid {
                        actual: other.len(),
                    });
                }
            },
        };

        let mount = match lookup(ENV_CWD) {
            None => None,
            Some(guest_path) => {
                let host_path = lookup(ENV_CWD_HOST).ok_or(ConfigError::HostPathMissing)?;
                Some(VolumeMount::new(
                    PathBuf::from(guest_path),
                    PathBuf::from(host_path),
                ))
            }
        };

        Ok(Self {
            message_delimiter,
            mount,
        })
    }

    /// Returns the byte terminating each framed message.
    #[must_use]
    pub const fn message_delimiter(&self) -> u8 {
        self.message_delimiter
    }

    /// Returns the mounted volume granted by the host, if any.
    #[must_use]
    pub const fn mount(&self) -> Option<&VolumeMount> {
        self.mount.as_ref()
    }

    /// Consumes the configuration, yielding the mount for the context.
    #[must_use]
    pub fn into_mount(self) -> Option<VolumeMount> {
        self.mount
    }
}

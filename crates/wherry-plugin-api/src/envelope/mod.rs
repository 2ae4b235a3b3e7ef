//! Request and response envelopes exchanged with the host.
//!
//! Both envelopes are tagged unions keyed by operation: exactly one
//! operation field is populated at a time, and absent fields are omitted
//! from the JSON entirely. A request with no operation populated is a
//! valid no-op; a request with an unrecognised field is a decode error,
//! never silently accepted.
//!
//! Serialised as a single delimiter-terminated JSON message per
//! invocation (see `wherry-guest` for the framing rules).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Request envelope written by the host to the guest's stdin.
///
/// # Example
///
/// ```
/// use wherry_plugin_api::{Request, WriteFileRequest};
/// use std::path::PathBuf;
///
/// let request = Request::new()
///     .with_write_file(WriteFileRequest::new(PathBuf::from("/src/lib.rs"), "fn main() {}\n"));
/// assert!(request.write_file().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    #[serde(
        default,
        rename = "writeFile",
        skip_serializing_if = "Option::is_none"
    )]
    write_file: Option<WriteFileRequest>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    data: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl Request {
    /// Creates an empty (no-op) request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the write-file operation.
    #[must_use]
    pub fn with_write_file(mut self, request: WriteFileRequest) -> Self {
        self.write_file = Some(request);
        self
    }

    /// Attaches named input data supplied by the host.
    #[must_use]
    pub fn with_data(mut self, data: HashMap<String, serde_json::Value>) -> Self {
        self.data = data;
        self
    }

    /// Attaches the opaque pass-through metadata record.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the write-file operation payload, if populated.
    #[must_use]
    pub const fn write_file(&self) -> Option<&WriteFileRequest> {
        self.write_file.as_ref()
    }

    /// Returns the named input data.
    #[must_use]
    pub const fn data(&self) -> &HashMap<String, serde_json::Value> {
        &self.data
    }

    /// Returns the opaque metadata record, if present.
    #[must_use]
    pub const fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// Splits the envelope into its operation payload, data, and metadata.
    #[must_use]
    pub fn into_parts(self) -> RequestParts {
        RequestParts {
            write_file: self.write_file,
            data: self.data,
            metadata: self.metadata,
        }
    }
}

/// Owned pieces of a decoded [`Request`], ready to thread into an
/// invocation context.
#[derive(Debug)]
pub struct RequestParts {
    /// The write-file operation payload, if populated.
    pub write_file: Option<WriteFileRequest>,
    /// Named inputs supplied by the host.
    pub data: HashMap<String, serde_json::Value>,
    /// Opaque pass-through metadata.
    pub metadata: Option<serde_json::Value>,
}

/// Response envelope written by the guest to its stdout.
///
/// At most one of the result field and the issue list is semantically
/// meaningful per invocation: the result is populated only on success,
/// and issues are reported whenever the handler failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(
        default,
        rename = "writeFile",
        skip_serializing_if = "Option::is_none"
    )]
    write_file: Option<WriteFileResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    issues: Vec<Issue>,
}

impl Response {
    /// Creates the empty response returned for no-op requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a successful response carrying a write-file result.
    #[must_use]
    pub fn success(result: WriteFileResponse) -> Self {
        Self {
            write_file: Some(result),
            issues: Vec::new(),
        }
    }

    /// Creates a failed response carrying the mapped issue list.
    #[must_use]
    pub fn failure(issues: Vec<Issue>) -> Self {
        Self {
            write_file: None,
            issues,
        }
    }

    /// Returns the write-file result, if populated.
    #[must_use]
    pub const fn write_file(&self) -> Option<&WriteFileResponse> {
        self.write_file.as_ref()
    }

    /// Returns the reported issues.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

/// How the plugin should treat an existing file at the target path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Fail if the target already exists.
    Create,
    /// Replace the target's content.
    #[default]
    Overwrite,
    /// Append to the target's content.
    Append,
}

impl WriteMode {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Overwrite => "overwrite",
            Self::Append => "append",
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for the write-file operation family.
///
/// The semantics of the edit belong to the plugin; the runtime threads
/// the payload through without inspecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteFileRequest {
    path: PathBuf,
    content: String,
    mode: WriteMode,
}

impl WriteFileRequest {
    /// Creates a request targeting `path` with the given content and the
    /// default [`WriteMode::Overwrite`] semantics.
    #[must_use]
    pub fn new(path: PathBuf, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
            mode: WriteMode::default(),
        }
    }

    /// Overrides the write mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the target path, relative to the mounted volume.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the content to write.
    #[must_use]
    pub const fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Returns the write mode.
    #[must_use]
    pub const fn mode(&self) -> WriteMode {
        self.mode
    }
}

/// Result of a completed write-file operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFileResponse {
    #[serde(
        default,
        rename = "bytesWritten",
        skip_serializing_if = "Option::is_none"
    )]
    bytes_written: Option<u64>,
}

impl WriteFileResponse {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how many bytes the plugin wrote.
    #[must_use]
    pub const fn with_bytes_written(mut self, bytes_written: u64) -> Self {
        self.bytes_written = Some(bytes_written);
        self
    }

    /// Returns the number of bytes written, if the plugin reported it.
    #[must_use]
    pub const fn bytes_written(&self) -> Option<u64> {
        self.bytes_written
    }
}

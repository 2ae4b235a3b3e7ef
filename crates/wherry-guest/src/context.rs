//! Per-invocation execution context handed to the plugin.
//!
//! The supervisor builds a fresh [`Context`] for every request from the
//! resolved configuration and the decoded envelope. Everything in it is
//! invocation-scoped; nothing survives into the next request.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation flag scoped to one invocation.
///
/// The supervisor never arms it: it exists for the handler's own use,
/// e.g. to bound a sub-operation from a helper thread. Clones share the
/// underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unarmed token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the token for every clone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once any clone has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Host-granted mount of the user's working directory inside the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    guest_path: PathBuf,
    host_path: PathBuf,
}

impl VolumeMount {
    /// Creates a mount from the paired guest and host paths.
    #[must_use]
    pub const fn new(guest_path: PathBuf, host_path: PathBuf) -> Self {
        Self {
            guest_path,
            host_path,
        }
    }

    /// Returns the root of the mount inside the guest.
    #[must_use]
    pub fn guest_path(&self) -> &Path {
        &self.guest_path
    }

    /// Returns the host-side path backing the mount. Useful for more
    /// informative messages; the path itself is not reachable from
    /// inside the guest.
    #[must_use]
    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    /// Resolves a path relative to the mount root.
    #[must_use]
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.guest_path.join(relative)
    }
}

/// Everything a handler may consult while serving one request.
///
/// Read-only from the handler's perspective, apart from the cancellation
/// token.
#[derive(Debug)]
pub struct Context {
    cancel: CancelToken,
    mount: Option<VolumeMount>,
    data: HashMap<String, serde_json::Value>,
    metadata: Option<serde_json::Value>,
}

impl Context {
    /// Builds the context for one invocation.
    #[must_use]
    pub fn new(
        mount: Option<VolumeMount>,
        data: HashMap<String, serde_json::Value>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            cancel: CancelToken::new(),
            mount,
            data,
            metadata,
        }
    }

    /// Returns the invocation's cancellation token.
    #[must_use]
    pub const fn cancel(&self) -> &CancelToken {
        &self.cancel
    }

    /// Returns the mounted working directory, if the host granted one.
    #[must_use]
    pub const fn mount(&self) -> Option<&VolumeMount> {
        self.mount.as_ref()
    }

    /// Returns the named inputs supplied by the host.
    #[must_use]
    pub const fn data(&self) -> &HashMap<String, serde_json::Value> {
        &self.data
    }

    /// Returns the opaque request metadata, if present. The runtime
    /// threads it through without inspecting it.
    #[must_use]
    pub const fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }
}

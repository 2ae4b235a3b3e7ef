//! The handler seam implemented by plugin authors.

#[cfg(test)]
use mockall::automock;

use wherry_plugin_api::{WriteFileRequest, WriteFileResponse};

use crate::context::Context;
use crate::failure::PluginFailure;

/// A plugin capable of performing operations on the user's files.
///
/// One method per operation family: the supervisor dispatches to the
/// method matching the populated field of the request envelope and never
/// calls anything for a no-op request. Implementations live for the whole
/// process once registered, so they must be thread-safe and should keep
/// per-request state inside the method body.
#[cfg_attr(test, automock)]
pub trait Plugin: Send + Sync {
    /// Handles a request to edit a single file within the user's
    /// project.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginFailure`] describing the issues to surface to
    /// the user. Failures returned here never abort the invocation; the
    /// supervisor folds them into the response envelope.
    fn write_file(
        &self,
        ctx: &Context,
        request: &WriteFileRequest,
    ) -> Result<WriteFileResponse, PluginFailure>;
}

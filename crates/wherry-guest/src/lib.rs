//! Guest-side runtime for Wherry plugins.
//!
//! A Wherry plugin is a sandboxed module driven by an external host. The
//! host configures each invocation through environment variables, writes
//! one delimiter-framed JSON request envelope to the module's stdin,
//! invokes the exported `handleRequest` entry point, branches on the
//! returned status code, and reads the framed response envelope from the
//! module's stdout. Plugin authors implement the [`Plugin`] trait and let
//! this crate speak the protocol:
//!
//! 1. Implement [`Plugin`] for your handler type.
//! 2. Call [`register_plugin!`] with a constructor expression to generate
//!    the entry point the host expects.
//! 3. Compile for the host's sandbox target and deploy.
//!
//! # Architecture
//!
//! One invocation is one strictly sequential pass through the supervisor
//! in [`runtime`]: configuration resolution ([`config`]), request framing
//! ([`framing`]) and decoding ([`codec`]), dispatch under failure
//! isolation, then response encoding and framing. Handler failures are
//! mapped into the response's issue list ([`failure`]) rather than
//! surfacing as protocol faults, and a panicking handler is intercepted
//! at the dispatch boundary instead of tearing down the module. All
//! diagnostics go to stderr ([`telemetry`]); stdout carries nothing but
//! the framed response.
//!
//! # Example
//!
//! ```rust,no_run
//! use wherry_guest::{Context, Plugin, PluginFailure, WriteFileRequest, WriteFileResponse};
//!
//! struct Editor;
//!
//! impl Plugin for Editor {
//!     fn write_file(
//!         &self,
//!         _ctx: &Context,
//!         request: &WriteFileRequest,
//!     ) -> Result<WriteFileResponse, PluginFailure> {
//!         if request.content().is_empty() {
//!             return Err(PluginFailure::warn("nothing to write"));
//!         }
//!         Ok(WriteFileResponse::new())
//!     }
//! }
//!
//! wherry_guest::register_plugin!(Editor);
//! ```

pub mod codec;
pub mod config;
pub mod context;
pub mod failure;
pub mod framing;
pub mod plugin;
pub mod registry;
pub mod runtime;
pub mod telemetry;

#[cfg(test)]
mod tests;

// Re-export the wire contract so plugin authors need only one dependency.
pub use wherry_plugin_api::{
    ExitCode, Issue, IssueLevel, Request, Response, WriteFileRequest, WriteFileResponse, WriteMode,
};

pub use self::config::GuestConfig;
pub use self::context::{CancelToken, Context, VolumeMount};
pub use self::failure::PluginFailure;
pub use self::plugin::Plugin;

/// Registers a plugin and generates the `handleRequest` entry point the
/// host invokes once per request.
///
/// The expression is evaluated and registered before the supervisor runs,
/// so the host can never observe a half-initialised module; the resulting
/// status code crosses the sandbox boundary as a `u64`.
#[macro_export]
macro_rules! register_plugin {
    ($plugin:expr) => {
        /// Entry point invoked by the Wherry host once per request.
        #[unsafe(export_name = "handleRequest")]
        pub extern "C" fn handle_request() -> u64 {
            $crate::registry::register($plugin);
            $crate::runtime::handle_request().into()
        }
    };
}

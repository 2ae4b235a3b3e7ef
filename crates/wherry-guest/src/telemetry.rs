//! Diagnostic logging initialisation for the guest.
//!
//! Every diagnostic goes to stderr: stdout is reserved for the framed
//! response, and the two channels must never interleave. Output is
//! structured JSON so the host can fold guest diagnostics into its own
//! logging stack.

use std::io;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use wherry_plugin_api::ENV_LOG_LEVEL;

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Filter applied when `__LOG_LEVEL` is unset or unparseable.
const DEFAULT_FILTER: &str = "info";

/// Installs the global stderr subscriber when invoked for the first time.
///
/// Repeated calls are no-ops, and failures are swallowed entirely: a
/// guest that cannot log must still serve its request, so nothing here
/// may abort the invocation.
pub fn initialise() {
    TELEMETRY_GUARD.get_or_init(|| {
        let filter = EnvFilter::try_from_env(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .with_ansi(false)
            .json()
            .finish();
        // Another subscriber may already be installed; keep it.
        drop(tracing::subscriber::set_global_default(subscriber));
    });
}

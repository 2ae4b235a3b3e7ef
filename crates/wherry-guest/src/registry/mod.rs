//! Process-wide registration slot for the plugin implementation.
//!
//! The slot holds at most one handler. Registration is expected to happen
//! exactly once, while the module initialises, strictly before the host
//! first invokes the entry point; the [`register_plugin!`](crate::register_plugin)
//! macro upholds that ordering by registering on entry. Registering again
//! silently replaces the previous handler (last write wins).

use std::sync::{Arc, PoisonError, RwLock};

use crate::plugin::Plugin;

static REGISTERED: RwLock<Option<Arc<dyn Plugin>>> = RwLock::new(None);

/// Registers `plugin` as the process-wide handler.
pub fn register(plugin: impl Plugin + 'static) {
    register_arc(Arc::new(plugin));
}

/// Registers an already-shared handler. See [`register`].
pub fn register_arc(plugin: Arc<dyn Plugin>) {
    let mut slot = REGISTERED.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(plugin);
}

/// Returns the registered handler, or `None` when the host invoked the
/// entry point before registration.
///
/// The read lock is the barrier that orders registration before lookup
/// for hosts that drive invocations from more than one thread.
#[must_use]
pub fn current() -> Option<Arc<dyn Plugin>> {
    REGISTERED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

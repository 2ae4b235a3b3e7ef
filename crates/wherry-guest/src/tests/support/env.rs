//! Environment serialisation helpers for tests that touch process state.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialises tests that read or mutate the process environment.
pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env mutex poisoned")
}

/// Sets an environment variable for the guard's lifetime and restores the
/// previous state on drop.
pub(crate) struct EnvVarGuard {
    name: &'static str,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    pub(crate) fn set(name: &'static str, value: &str) -> Self {
        let previous = env::var_os(name);
        // Environment mutation is unsafe on edition 2024; callers hold
        // the env mutex for the guard's whole lifetime.
        unsafe { env::set_var(name, value) };
        Self { name, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { env::set_var(self.name, value) },
            None => unsafe { env::remove_var(self.name) },
        }
    }
}

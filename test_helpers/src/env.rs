//! Scoped environment variable mutation for tests.
//!
//! Every mutation takes a process-wide re-entrant lock and returns a guard
//! that puts the previous value back when dropped. Guards for the same key
//! restore in reverse creation order. Hold [`lock`] while reading several
//! variables that other tests may change.
//!
//! ```
//! use cog_cfn_test_helpers::env;
//!
//! let _level = env::set_var("COG_CFN_LOG", "debug");
//! assert_eq!(std::env::var("COG_CFN_LOG").as_deref(), Ok("debug"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Guard restoring one variable to the value it had before the mutation.
#[must_use = "dropping the guard restores the variable immediately"]
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub const fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        let original = self.original.take();
        // SAFETY: the environment lock is held.
        unsafe {
            match original {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

/// Acquires the environment lock for a sequence of reads or mutations.
///
/// The lock is re-entrant, so the mutation helpers may be called while it
/// is held.
pub fn lock() -> ReentrantMutexGuard<'static, ()> {
    ENV_LOCK.lock()
}

/// Sets `key` to `value` until the guard is dropped.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    let key = key.into();
    let _lock = ENV_LOCK.lock();
    let original = std::env::var_os(&key);
    // SAFETY: the environment lock is held.
    unsafe { std::env::set_var(&key, value) };
    EnvVarGuard { key, original }
}

/// Removes `key` until the guard is dropped.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    let key = key.into();
    let _lock = ENV_LOCK.lock();
    let original = std::env::var_os(&key);
    // SAFETY: the environment lock is held.
    unsafe { std::env::remove_var(&key) };
    EnvVarGuard { key, original }
}

/// Removes every variable whose name starts with `prefix`.
///
/// Keeps configuration tests independent of whatever the developer's shell
/// exports.
#[must_use = "dropping the guards restores the variables immediately"]
pub fn clear_prefixed(prefix: &str) -> Vec<EnvVarGuard> {
    let _lock = ENV_LOCK.lock();
    let keys: Vec<String> = std::env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.starts_with(prefix))
        .collect();
    keys.into_iter().map(remove_var).collect()
}

//! Scoped, serialised environment mutation for tests.
//!
//! Every mutation takes a process-wide re-entrant lock and returns an
//! [`EnvVarGuard`] that puts the variable back when dropped. Guards for the
//! same key restore in LIFO order. Use [`scope`] when a test needs several
//! variables to hold for its whole body without other tests interleaving.
//!
//! # Examples
//!
//! ```
//! use flagbind_test_helpers::env;
//!
//! let _guard = env::set_var("DB_HOST", "db.internal");
//! assert_eq!(std::env::var("DB_HOST").as_deref(), Ok("db.internal"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    fn capture(key: String, mutate: impl FnOnce(&str)) -> Self {
        let _lock = ENV_LOCK.lock();
        let original = env::var_os(&key);
        mutate(&key);
        Self { key, original }
    }

    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        match self.original.take() {
            // SAFETY: every mutation in this module holds `ENV_LOCK`.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: as above.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// Sets `key` to `value` until the returned guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvVarGuard::capture(key.into(), |name| {
        // SAFETY: `capture` holds `ENV_LOCK`.
        unsafe { env::set_var(name, value.as_ref()) };
    })
}

/// Removes `key` until the returned guard drops.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    EnvVarGuard::capture(key.into(), |name| {
        // SAFETY: `capture` holds `ENV_LOCK`.
        unsafe { env::remove_var(name) };
    })
}

/// Holds the environment lock and a set of guards for its lifetime.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the lock and restores every guard"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Number of variables held by the scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the scope holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys unwind correctly.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Applies `vars` while holding the lock for the scope's lifetime.
///
/// A `None` value removes the variable.
///
/// # Examples
///
/// ```
/// use flagbind_test_helpers::env;
///
/// let _scope = env::scope([("REDIS_ADDR", Some("cache:6379")), ("REDIS_DB", None)]);
/// assert_eq!(std::env::var("REDIS_ADDR").as_deref(), Ok("cache:6379"));
/// assert!(std::env::var("REDIS_DB").is_err());
/// ```
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_LOCK.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| match value {
            Some(value) => set_var(key, value),
            None => remove_var(key),
        })
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

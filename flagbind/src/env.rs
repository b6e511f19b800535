//! Environment lookups used to override flag defaults.
//!
//! Flags never read `std::env` directly. They go through an [`EnvSource`] so
//! tests and embedders can supply a fixed environment with [`MapEnv`].

use std::collections::HashMap;

use tracing::warn;

use crate::FlagValue;

/// Source of environment variables.
pub trait EnvSource {
    /// Returns the raw value of `name`, or `None` when it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables.
///
/// # Examples
///
/// ```
/// use flagbind::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("DB_HOST", "db.internal");
/// assert_eq!(env.var("DB_HOST").as_deref(), Some("db.internal"));
/// assert_eq!(env.var("DB_PORT"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Reads `name` from `source` as a `T`.
///
/// Unset and empty variables yield `None`. A value that does not parse also
/// yields `None` and is reported at `warn` level, so the caller falls back to
/// its default rather than failing.
pub fn lookup<T: FlagValue>(source: &dyn EnvSource, name: &str) -> Option<T> {
    let raw = source.var(name).filter(|value| !value.is_empty())?;
    match T::parse_flag(&raw) {
        Ok(value) => Some(value),
        Err(reason) => {
            warn!(
                variable = name,
                kind = %T::KIND,
                %reason,
                "ignoring unparseable environment value"
            );
            None
        }
    }
}

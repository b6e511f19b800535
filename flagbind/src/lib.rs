//! Typed command-line flags with environment overrides, defaults and
//! required-value checks.
//!
//! A [`Flag`] binds a caller-owned field to a long command-line option. When
//! the flag is added to a [`FlagSet`] its starting value is resolved
//! immediately: a set, non-empty and parseable environment variable wins,
//! then the caller's default, then the type's zero value. Parsing the command
//! line afterwards overrides that value, and [`FlagSet::check`] reports every
//! required flag still at zero.
//!
//! Supported scalar types are listed by [`Kind`]. Behaviour per type lives in
//! a [`TypeRegistry`]; the set only ever dispatches through it.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use clap::Command;
//! use flagbind::{Flag, FlagError, FlagSet, MapEnv};
//!
//! #[derive(Debug, Default)]
//! struct Cache {
//!     addr: String,
//!     db: i64,
//!     idle_timeout: Duration,
//! }
//!
//! let env = MapEnv::new().with("REDIS_DB", "3");
//! let mut cache = Cache::default();
//! {
//!     let mut flags = FlagSet::new().with_env(&env);
//!     let command = flags.add(
//!         Command::new("worker"),
//!         [
//!             Flag::new(&mut cache.addr, "redis-addr", "Redis address")
//!                 .env("REDIS_ADDR")
//!                 .default(String::from("127.0.0.1:6379"))
//!                 .required()
//!                 .build(),
//!             Flag::new(&mut cache.db, "redis-db", "Redis database")
//!                 .env("REDIS_DB")
//!                 .build(),
//!             Flag::new(&mut cache.idle_timeout, "redis-idle-timeout", "Idle timeout")
//!                 .default(Duration::from_secs(1))
//!                 .build(),
//!         ],
//!     )?;
//!     flags.parse_from(command, ["worker", "--redis-idle-timeout", "5s"])?;
//!     flags.check()?;
//! }
//!
//! assert_eq!(cache.addr, "127.0.0.1:6379");
//! assert_eq!(cache.db, 3);
//! assert_eq!(cache.idle_timeout, Duration::from_secs(5));
//! # Ok::<(), FlagError>(())
//! ```

pub mod env;
mod error;
mod flag;
mod kind;
mod registry;
mod set;
mod types;
mod value;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{AggregatedErrors, FlagError, is_display_request};
pub use flag::{Destination, Flag, FlagBuilder, Slot};
pub use kind::Kind;
pub use registry::{
    ApplyFn, BindFn, TypeBehavior, TypeRegistry, ValidateFn, accept_any_value, apply_value,
    bind_value, registry, require_non_zero,
};
pub use set::FlagSet;
pub use value::FlagValue;

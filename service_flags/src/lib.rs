//! Connection settings for common backing services, declared once as
//! [`flagbind`] flags.
//!
//! Each configuration type implements [`FlagGroup`]: its fields are bound to
//! command-line flags with environment overrides and defaults, and it exposes
//! pure helpers that turn the loaded values into connection strings or file
//! sets. Nothing here opens a connection.
//!
//! - [`PostgresConfig`] renders a libpq DSN.
//! - [`RedisConfig`] renders a `redis://` URL.
//! - [`NsqConfig`] resolves client settings, including TLS files.
//! - [`RootCommand`] assembles the top-level command with a `version`
//!   subcommand, logging flags, an optional `gendocs` subcommand and
//!   user-agent derivation, and turns a run's outcome into an exit status
//!   with [`RootCommand::execute`].
//!
//! A [`Prefix`] lets one binary carry several copies of the same group, for
//! example a primary and a replica database.

mod error;
mod group;
mod nsq;
mod postgresql;
mod prefix;
mod redis;
mod root;

pub use error::{ExitCoder, ServiceError};
pub use group::{FlagGroup, bind, finish, parse_group};
pub use nsq::{ClientSettings, NsqConfig, TlsFiles};
pub use postgresql::{PostgresConfig, SslMode};
pub use prefix::Prefix;
pub use redis::{DEFAULT_ADDR as DEFAULT_REDIS_ADDR, DEFAULT_IDLE_TIMEOUT, RedisConfig};
pub use root::{LogConfig, RootCommand, VersionInfo, subcommand_path};

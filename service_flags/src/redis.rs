//! Redis connection settings.

use std::time::Duration;

use flagbind::Flag;

use crate::{FlagGroup, Prefix};

/// Idle timeout used when none is configured.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Address used when none is configured.
pub const DEFAULT_ADDR: &str = "127.0.0.1:6379";

/// Settings for one Redis database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedisConfig {
    /// `host:port` of the server.
    pub addr: String,
    /// Logical database selected after connecting.
    pub db: i64,
    /// How long an idle pooled connection is kept.
    pub idle_timeout: Duration,
}

impl FlagGroup for RedisConfig {
    fn flags<'a>(&'a mut self, prefix: &Prefix) -> Vec<Flag<'a>> {
        vec![
            Flag::new(
                &mut self.addr,
                prefix.flag_name("redis-addr"),
                "Redis address and port to connect to",
            )
            .env(prefix.env_name("REDIS_ADDR"))
            .default(DEFAULT_ADDR.to_owned())
            .build(),
            Flag::new(
                &mut self.db,
                prefix.flag_name("redis-db"),
                "Redis database number to use",
            )
            .env(prefix.env_name("REDIS_DB"))
            .default(0)
            .build(),
            Flag::new(
                &mut self.idle_timeout,
                prefix.flag_name("redis-idle-timeout"),
                "Redis idle timeout to use",
            )
            .env(prefix.env_name("REDIS_IDLE_TIMEOUT"))
            .default(DEFAULT_IDLE_TIMEOUT)
            .build(),
        ]
    }
}

impl RedisConfig {
    /// `redis://ADDR/DB`.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!("redis://{}/{}", self.addr, self.db)
    }
}

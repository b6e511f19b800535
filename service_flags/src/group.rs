//! The shared lifecycle for configuration types built from flags.

use std::ffi::OsString;

use clap::{ArgMatches, Command};
use flagbind::{EnvSource, Flag, FlagSet};

use crate::{Prefix, ServiceError};

/// A configuration type whose fields are populated by flags.
pub trait FlagGroup {
    /// Declares the group's flags, each borrowing one of its fields.
    fn flags<'a>(&'a mut self, prefix: &Prefix) -> Vec<Flag<'a>>;
}

/// Adds `group`'s flags to `command` through `set`.
///
/// # Errors
///
/// Returns a fatal [`ServiceError::Flags`] when a flag cannot be bound.
pub fn bind<'a, G: FlagGroup>(
    set: &mut FlagSet<'a>,
    command: Command,
    group: &'a mut G,
    prefix: &Prefix,
) -> Result<Command, ServiceError> {
    Ok(set.add(command, group.flags(prefix))?)
}

/// Applies `matches` to `set`, checks required flags and releases the
/// borrowed fields.
///
/// # Errors
///
/// Returns [`ServiceError::Flags`] when applying fails or a required flag is
/// unset.
pub fn finish(mut set: FlagSet<'_>, matches: &ArgMatches) -> Result<(), ServiceError> {
    set.apply(matches)?;
    set.check()?;
    Ok(())
}

/// Runs the bind, parse and check lifecycle for a single group.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use flagbind::MapEnv;
/// use service_flags::{Prefix, RedisConfig, parse_group};
///
/// let env = MapEnv::new().with("CACHE_REDIS_DB", "2");
/// let redis: RedisConfig = parse_group(
///     Command::new("worker"),
///     ["worker", "--cache-redis-addr", "cache:6379"],
///     &Prefix::new("cache"),
///     &env,
/// )?;
/// assert_eq!(redis.connection_url(), "redis://cache:6379/2");
/// # Ok::<(), service_flags::ServiceError>(())
/// ```
///
/// # Errors
///
/// Returns [`ServiceError::Flags`] for parse failures and missing values.
pub fn parse_group<G, I, T>(
    command: Command,
    args: I,
    prefix: &Prefix,
    env: &dyn EnvSource,
) -> Result<G, ServiceError>
where
    G: FlagGroup + Default,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut group = G::default();
    {
        let mut set = FlagSet::new().with_env(env);
        let command = bind(&mut set, command, &mut group, prefix)?;
        let matches = command.try_get_matches_from(args)?;
        finish(set, &matches)?;
    }
    Ok(group)
}

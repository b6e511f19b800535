//! Ordered collections of bound flags.

use std::ffi::OsString;
use std::fmt;

use clap::{ArgMatches, Command};

use crate::env::{EnvSource, ProcessEnv};
use crate::{Flag, FlagError, TypeRegistry, registry};

static PROCESS_ENV: ProcessEnv = ProcessEnv;

/// Flags bound into a clap [`Command`], kept in registration order.
///
/// A set drives the whole lifecycle of its flags: [`FlagSet::add`] resolves
/// defaults and registers arguments, [`FlagSet::apply`] (or
/// [`FlagSet::parse_from`]) copies command-line values back, and
/// [`FlagSet::check`] reports required flags that are still unset. The set
/// borrows every destination for its own lifetime, so the caller's fields
/// become readable again once it is dropped.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use flagbind::{Flag, FlagSet, MapEnv};
///
/// let mut host = String::new();
/// let mut port: u16 = 0;
/// let env = MapEnv::new().with("DB_PORT", "6543");
/// let mut flags = FlagSet::new().with_env(&env);
/// let command = flags.add(
///     Command::new("app"),
///     [
///         Flag::new(&mut host, "db-host", "Database host")
///             .default(String::from("127.0.0.1"))
///             .required()
///             .build(),
///         Flag::new(&mut port, "db-port", "Database port")
///             .env("DB_PORT")
///             .default(5432)
///             .build(),
///     ],
/// )?;
/// flags.parse_from(command, ["app", "--db-host", "db.internal"])?;
/// flags.check()?;
///
/// assert_eq!(host, "db.internal");
/// assert_eq!(port, 6543);
/// # Ok::<(), flagbind::FlagError>(())
/// ```
pub struct FlagSet<'a> {
    flags: Vec<Flag<'a>>,
    registry: &'a TypeRegistry,
    env: &'a dyn EnvSource,
}

impl<'a> FlagSet<'a> {
    /// Creates an empty set using the process-wide registry and environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(registry())
    }

    /// Creates an empty set that dispatches through `registry`.
    #[must_use]
    pub fn with_registry(registry: &'a TypeRegistry) -> Self {
        Self {
            flags: Vec::new(),
            registry,
            env: &PROCESS_ENV,
        }
    }

    /// Reads environment overrides from `env` instead of the process.
    #[must_use]
    pub fn with_env(mut self, env: &'a dyn EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Binds `flags` into `command` and starts tracking them.
    ///
    /// Each flag's starting value (environment, then default, then zero) is
    /// written to its destination before the argument is registered.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`FlagError::UnsupportedKind`] or
    /// [`FlagError::KindMismatch`] when the registry cannot handle a flag.
    /// Flags before the failing one remain tracked.
    pub fn add<I>(&mut self, mut command: Command, flags: I) -> Result<Command, FlagError>
    where
        I: IntoIterator<Item = Flag<'a>>,
    {
        for mut flag in flags {
            let behavior = self.registry.require(&flag)?;
            command = behavior.bind(command, &mut flag, self.env)?;
            self.flags.push(flag);
        }
        Ok(command)
    }

    /// Copies values given on the command line into their destinations.
    ///
    /// `matches` must come from the command (or subcommand) the flags were
    /// added to.
    ///
    /// # Errors
    ///
    /// Returns a fatal error when a flag is missing from `matches` or the
    /// registry cannot handle it.
    pub fn apply(&mut self, matches: &ArgMatches) -> Result<(), FlagError> {
        for flag in &mut self.flags {
            let behavior = self.registry.require(flag)?;
            behavior.apply(flag, matches)?;
        }
        Ok(())
    }

    /// Parses `args` with `command`, then [applies](FlagSet::apply) the result.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::CliParsing`] when clap rejects the arguments
    /// (including `--help`, see [`crate::is_display_request`]), or any error
    /// from [`FlagSet::apply`].
    pub fn parse_from<I, T>(&mut self, command: Command, args: I) -> Result<ArgMatches, FlagError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command.try_get_matches_from(args)?;
        self.apply(&matches)?;
        Ok(matches)
    }

    /// Verifies that every required flag holds a non-zero value.
    ///
    /// All required flags are inspected in insertion order before anything
    /// is reported.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Missing`] for a single unset flag,
    /// [`FlagError::Aggregate`] for several, or a fatal error as soon as a
    /// flag's kind cannot be handled.
    pub fn check(&self) -> Result<(), FlagError> {
        self.registry.check(&self.flags)
    }

    /// Tracked flags in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flag<'a>> {
        self.flags.iter()
    }

    /// Names of the tracked flags in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.flags.iter().map(Flag::name).collect()
    }

    /// Number of tracked flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Default for FlagSet<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("flags", &self.flags)
            .field("registered_kinds", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl<'s, 'a> IntoIterator for &'s FlagSet<'a> {
    type Item = &'s Flag<'a>;
    type IntoIter = std::slice::Iter<'s, Flag<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

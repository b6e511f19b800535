//! Table of per-kind behaviours consulted by [`crate::FlagSet`].
//!
//! The flag set never matches on concrete types. It derives a [`Kind`] from
//! each flag's destination and dispatches to the [`TypeBehavior`] registered
//! for it, so supporting another scalar is an additive change in the `types`
//! module.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use clap::{Arg, ArgMatches, Command};
use tracing::debug;

use crate::env::{self, EnvSource};
use crate::{Flag, FlagError, FlagValue, Kind};

/// Registers a flag with clap after resolving its default.
pub type BindFn = fn(Command, &mut Flag<'_>, &dyn EnvSource) -> Result<Command, FlagError>;

/// Copies a command-line value from parsed matches into the destination.
pub type ApplyFn = fn(&mut Flag<'_>, &ArgMatches) -> Result<(), FlagError>;

/// Checks a required flag after parsing.
pub type ValidateFn = fn(&Flag<'_>) -> Result<(), FlagError>;

/// The bind, apply and validate behaviours for one kind.
#[derive(Debug, Clone, Copy)]
pub struct TypeBehavior {
    bind: BindFn,
    apply: ApplyFn,
    validate: ValidateFn,
}

impl TypeBehavior {
    /// Assembles a behaviour from its parts.
    #[must_use]
    pub const fn new(bind: BindFn, apply: ApplyFn, validate: ValidateFn) -> Self {
        Self {
            bind,
            apply,
            validate,
        }
    }

    /// The standard behaviour for `T`: default precedence on bind, typed
    /// write-back on apply, and a zero-value check on validate.
    #[must_use]
    pub const fn of<T: FlagValue>() -> Self {
        Self::new(bind_value::<T>, apply_value::<T>, require_non_zero::<T>)
    }

    /// Runs the bind behaviour.
    ///
    /// # Errors
    ///
    /// Propagates the behaviour's error, typically [`FlagError::KindMismatch`].
    pub fn bind(
        &self,
        command: Command,
        flag: &mut Flag<'_>,
        source: &dyn EnvSource,
    ) -> Result<Command, FlagError> {
        (self.bind)(command, flag, source)
    }

    /// Runs the apply behaviour.
    ///
    /// # Errors
    ///
    /// Propagates the behaviour's error.
    pub fn apply(&self, flag: &mut Flag<'_>, matches: &ArgMatches) -> Result<(), FlagError> {
        (self.apply)(flag, matches)
    }

    /// Runs the validate behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Missing`] when the flag is unset, or a fatal
    /// error when the behaviour cannot read the destination.
    pub fn validate(&self, flag: &Flag<'_>) -> Result<(), FlagError> {
        (self.validate)(flag)
    }
}

/// Where a bound flag's starting value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Zero,
    Default,
    Environment,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zero => "zero",
            Self::Default => "default",
            Self::Environment => "environment",
        })
    }
}

/// Standard bind behaviour.
///
/// The starting value is the environment variable when set and parseable,
/// else the caller's default, else the zero value. It is written into the
/// destination immediately; a command-line value applied later overrides it.
///
/// # Errors
///
/// Returns [`FlagError::KindMismatch`] when the destination is not a `T`.
pub fn bind_value<T: FlagValue>(
    command: Command,
    flag: &mut Flag<'_>,
    source: &dyn EnvSource,
) -> Result<Command, FlagError> {
    let from_env = flag
        .env_var()
        .and_then(|var| env::lookup::<T>(source, var));
    let name = flag.name().to_owned();
    let mut help = flag.rendered_usage();
    let slot = flag.slot_mut::<T>()?;
    let (value, origin) = match (from_env, slot.default_value()) {
        (Some(value), _) => (value, Origin::Environment),
        (None, Some(default)) => (default.clone(), Origin::Default),
        (None, None) => (T::zero(), Origin::Zero),
    };
    if !value.is_zero() {
        help = format!("{help} [default: {}]", value.render());
    }
    debug!(flag = %name, kind = %T::KIND, %origin, "bound flag");
    slot.store(value);
    let arg = T::configure(Arg::new(name.clone()).long(name).help(help));
    Ok(command.arg(arg))
}

/// Standard apply behaviour: overwrite the destination when the flag was
/// given on the command line.
///
/// # Errors
///
/// Returns [`FlagError::Matches`] when `matches` were produced by a command
/// the flag was never bound to, or [`FlagError::KindMismatch`] when the
/// destination is not a `T`.
pub fn apply_value<T: FlagValue>(
    flag: &mut Flag<'_>,
    matches: &ArgMatches,
) -> Result<(), FlagError> {
    let supplied = matches
        .try_get_one::<T>(flag.name())
        .map_err(|source| FlagError::Matches {
            name: flag.name().to_owned(),
            source,
        })?
        .cloned();
    let Some(value) = supplied else {
        return Ok(());
    };
    debug!(flag = %flag.name(), kind = %T::KIND, "applied command-line value");
    flag.slot_mut::<T>()?.store(value);
    Ok(())
}

/// Standard validate behaviour: a zero value means the flag was not supplied.
///
/// # Errors
///
/// Returns [`FlagError::Missing`] for a zero value, or
/// [`FlagError::KindMismatch`] when the destination is not a `T`.
pub fn require_non_zero<T: FlagValue>(flag: &Flag<'_>) -> Result<(), FlagError> {
    if flag.slot::<T>()?.current().is_zero() {
        return Err(FlagError::missing(flag.name()));
    }
    Ok(())
}

/// Validate behaviour for types whose zero value is a legitimate setting.
///
/// Only confirms the destination holds a `T`.
///
/// # Errors
///
/// Returns [`FlagError::KindMismatch`] when the destination is not a `T`.
pub fn accept_any_value<T: FlagValue>(flag: &Flag<'_>) -> Result<(), FlagError> {
    flag.slot::<T>().map(|_| ())
}

/// Maps each [`Kind`] to its [`TypeBehavior`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    behaviors: BTreeMap<Kind, TypeBehavior>,
}

impl TypeRegistry {
    /// Creates a registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in type.
    #[must_use]
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::empty();
        crate::types::register_builtin(&mut registry);
        registry
    }

    /// Registers `behavior` for `kind`, replacing any earlier entry.
    pub fn register(&mut self, kind: Kind, behavior: TypeBehavior) {
        self.behaviors.insert(kind, behavior);
    }

    /// Looks up the behaviour for `kind`.
    #[must_use]
    pub fn lookup(&self, kind: Kind) -> Option<&TypeBehavior> {
        self.behaviors.get(&kind)
    }

    /// Registered kinds in key order.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.behaviors.keys().copied()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Validates every required flag in `flags`, in order.
    ///
    /// Missing values are collected so one call reports all of them.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Missing`] for a single unset flag,
    /// [`FlagError::Aggregate`] for several, or a fatal error as soon as a
    /// flag's kind cannot be handled.
    pub fn check<'f, 'a: 'f, I>(&self, flags: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = &'f Flag<'a>>,
    {
        let mut missing = Vec::new();
        for flag in flags.into_iter().filter(|flag| flag.is_required()) {
            match self.require(flag)?.validate(flag) {
                Ok(()) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => missing.push(err),
            }
        }
        FlagError::try_aggregate(missing).map_or(Ok(()), Err)
    }

    /// Looks up the behaviour for `flag`'s kind.
    pub(crate) fn require(&self, flag: &Flag<'_>) -> Result<TypeBehavior, FlagError> {
        self.lookup(flag.kind())
            .copied()
            .ok_or_else(|| FlagError::UnsupportedKind {
                name: flag.name().to_owned(),
                kind: flag.kind(),
            })
    }
}

static REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::with_builtin_types);

/// The process-wide registry.
///
/// Populated with every built-in type on first access and read-only
/// afterwards.
#[must_use]
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

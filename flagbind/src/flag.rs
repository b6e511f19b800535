//! Flag descriptors: what a flag binds to and how it is documented.

use std::time::Duration;

use crate::{FlagError, FlagValue, Kind};

/// Typed storage for one flag: the caller's field and an optional default.
///
/// The caller owns the field; the slot borrows it for as long as the owning
/// [`crate::FlagSet`] lives.
#[derive(Debug)]
pub struct Slot<'a, T> {
    target: &'a mut T,
    default: Option<T>,
}

impl<'a, T: FlagValue> Slot<'a, T> {
    const fn new(target: &'a mut T, default: Option<T>) -> Self {
        Self { target, default }
    }

    /// Current value of the bound field.
    #[must_use]
    pub fn current(&self) -> &T {
        &*self.target
    }

    /// Caller-supplied default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub(crate) fn store(&mut self, value: T) {
        *self.target = value;
    }
}

/// The field a flag writes to, tagged by scalar type.
///
/// Each variant pairs the borrowed field with a default of the same type, so
/// a default that disagrees with its destination cannot be expressed.
#[derive(Debug)]
#[non_exhaustive]
pub enum Destination<'a> {
    /// A `bool` field.
    Bool(Slot<'a, bool>),
    /// A `String` field.
    String(Slot<'a, String>),
    /// An `i8` field.
    Int8(Slot<'a, i8>),
    /// An `i16` field.
    Int16(Slot<'a, i16>),
    /// An `i32` field.
    Int32(Slot<'a, i32>),
    /// An `i64` field.
    Int64(Slot<'a, i64>),
    /// An `isize` field.
    Int(Slot<'a, isize>),
    /// A `u8` field.
    Uint8(Slot<'a, u8>),
    /// A `u16` field.
    Uint16(Slot<'a, u16>),
    /// A `u32` field.
    Uint32(Slot<'a, u32>),
    /// A `u64` field.
    Uint64(Slot<'a, u64>),
    /// A `usize` field.
    Uint(Slot<'a, usize>),
    /// An `f32` field.
    Float32(Slot<'a, f32>),
    /// An `f64` field.
    Float64(Slot<'a, f64>),
    /// A [`Duration`] field.
    Duration(Slot<'a, Duration>),
}

impl Destination<'_> {
    /// Registry key for the wrapped field's type.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::String(_) => Kind::String,
            Self::Int8(_) => Kind::Int8,
            Self::Int16(_) => Kind::Int16,
            Self::Int32(_) => Kind::Int32,
            Self::Int64(_) => Kind::Int64,
            Self::Int(_) => Kind::Int,
            Self::Uint8(_) => Kind::Uint8,
            Self::Uint16(_) => Kind::Uint16,
            Self::Uint32(_) => Kind::Uint32,
            Self::Uint64(_) => Kind::Uint64,
            Self::Uint(_) => Kind::Uint,
            Self::Float32(_) => Kind::Float32,
            Self::Float64(_) => Kind::Float64,
            Self::Duration(_) => Kind::Duration,
        }
    }
}

/// Declaration of one configurable value.
///
/// Built with [`Flag::new`] and the [`FlagBuilder`] modifiers, then handed
/// to [`crate::FlagSet::add`]. A flag is immutable once built.
#[derive(Debug)]
pub struct Flag<'a> {
    destination: Destination<'a>,
    name: String,
    usage: String,
    env: Option<String>,
    required: bool,
}

impl<'a> Flag<'a> {
    /// Starts declaring a flag named `name` that writes to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagbind::{Flag, Kind};
    ///
    /// let mut port: u16 = 0;
    /// let flag = Flag::new(&mut port, "db-port", "Database port")
    ///     .env("DB_PORT")
    ///     .default(5432)
    ///     .required()
    ///     .build();
    /// assert_eq!(flag.kind(), Kind::Uint16);
    /// assert_eq!(flag.rendered_usage(), "Database port [env: DB_PORT]");
    /// ```
    pub fn new<T: FlagValue>(
        target: &'a mut T,
        name: impl Into<String>,
        usage: impl Into<String>,
    ) -> FlagBuilder<'a, T> {
        FlagBuilder {
            target,
            name: name.into(),
            usage: usage.into(),
            env: None,
            default: None,
            required: false,
        }
    }

    /// External flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text as supplied by the caller.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Help text with a note naming the environment variable, if any.
    #[must_use]
    pub fn rendered_usage(&self) -> String {
        match &self.env {
            Some(env) => format!("{} [env: {env}]", self.usage),
            None => self.usage.clone(),
        }
    }

    /// Environment variable consulted before the default.
    #[must_use]
    pub fn env_var(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// Whether the post-parse check rejects a zero value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Registry key derived from the destination.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.destination.kind()
    }

    /// The tagged destination.
    #[must_use]
    pub const fn destination(&self) -> &Destination<'a> {
        &self.destination
    }

    /// Borrows the typed slot, failing when the destination holds another type.
    pub(crate) fn slot<T: FlagValue>(&self) -> Result<&Slot<'a, T>, FlagError> {
        T::project(&self.destination).ok_or_else(|| self.mismatch(T::KIND))
    }

    /// Mutable counterpart of [`Flag::slot`].
    pub(crate) fn slot_mut<T: FlagValue>(&mut self) -> Result<&mut Slot<'a, T>, FlagError> {
        let mismatch = self.mismatch(T::KIND);
        T::project_mut(&mut self.destination).ok_or(mismatch)
    }

    fn mismatch(&self, expected: Kind) -> FlagError {
        FlagError::KindMismatch {
            name: self.name.clone(),
            expected,
            found: self.kind(),
        }
    }
}

/// Chained modifiers applied while declaring a [`Flag`].
///
/// Later calls override earlier ones, so `.required().not_required()` leaves
/// the flag optional.
#[derive(Debug)]
#[must_use = "call `build` to obtain the flag"]
pub struct FlagBuilder<'a, T> {
    target: &'a mut T,
    name: String,
    usage: String,
    env: Option<String>,
    default: Option<T>,
    required: bool,
}

impl<'a, T: FlagValue> FlagBuilder<'a, T> {
    /// Names an environment variable that overrides the default.
    ///
    /// An empty name clears any earlier override.
    pub fn env(mut self, name: impl Into<String>) -> Self {
        let var = name.into();
        self.env = (!var.is_empty()).then_some(var);
        self
    }

    /// Sets the value used when neither the environment nor the command line
    /// supplies one.
    ///
    /// The default has the destination's type, so a mismatch is rejected at
    /// compile time:
    ///
    /// ```compile_fail
    /// let mut port: u16 = 0;
    /// let flag = flagbind::Flag::new(&mut port, "db-port", "Database port")
    ///     .default("5432")
    ///     .build();
    /// ```
    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the flag as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the flag as optional.
    pub const fn not_required(mut self) -> Self {
        self.required = false;
        self
    }

    /// Finishes the declaration.
    pub fn build(self) -> Flag<'a> {
        Flag {
            destination: T::wrap(Slot::new(self.target, self.default)),
            name: self.name,
            usage: self.usage,
            env: self.env,
            required: self.required,
        }
    }
}

impl<'a, T: FlagValue> From<FlagBuilder<'a, T>> for Flag<'a> {
    fn from(builder: FlagBuilder<'a, T>) -> Self {
        builder.build()
    }
}

//! Constructors and inspection helpers for `FlagError`.

use super::{AggregatedErrors, FlagError};

impl FlagError {
    /// Builds the error reported for a required flag left at its zero value.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Collapses `errors` into one value.
    ///
    /// Returns `None` for no errors, the error itself for exactly one, and
    /// [`FlagError::Aggregate`] preserving order for two or more.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        match collected.len() {
            0 => None,
            1 => collected.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }

    /// Like [`FlagError::try_aggregate`] for callers that hold at least one
    /// error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Whether this error reports a wiring mistake rather than bad input.
    ///
    /// Fatal errors cannot be fixed by the user; callers should abort setup
    /// instead of printing usage help.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::UnsupportedKind { .. } | Self::KindMismatch { .. } | Self::Matches { .. } => {
                true
            }
            Self::Aggregate(errors) => errors.iter().any(Self::is_fatal),
            Self::Missing { .. } | Self::CliParsing(_) => false,
        }
    }

    /// Names of the flags reported missing, in the order they were checked.
    #[must_use]
    pub fn missing_names(&self) -> Vec<&str> {
        match self {
            Self::Missing { name } => vec![name.as_str()],
            Self::Aggregate(errors) => errors.iter().flat_map(Self::missing_names).collect(),
            _ => Vec::new(),
        }
    }
}

//! Container for errors collected across every flag in a set.

use std::{error::Error, fmt};

use super::FlagError;

/// Errors gathered by a single validation pass, in flag insertion order.
///
/// # Examples
///
/// ```
/// use flagbind::FlagError;
///
/// let err = FlagError::aggregate(vec![
///     FlagError::missing("db-user"),
///     FlagError::missing("db-name"),
/// ]);
/// if let FlagError::Aggregate(agg) = &err {
///     assert_eq!(agg.len(), 2);
/// }
/// assert_eq!(err.missing_names(), ["db-user", "db-name"]);
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<FlagError>);

impl AggregatedErrors {
    /// Wraps `errors` without reordering them.
    #[must_use]
    pub const fn new(errors: Vec<FlagError>) -> Self {
        Self(errors)
    }

    /// Iterates over the collected errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, FlagError> {
        self.0.iter()
    }

    /// Number of collected errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a FlagError;
    type IntoIter = std::slice::Iter<'a, FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = FlagError;
    type IntoIter = std::vec::IntoIter<FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

//! Primary error enum for flag handling.

use clap::parser::MatchesError;
use thiserror::Error;

use super::AggregatedErrors;
use crate::Kind;

/// Errors raised by [`crate::FlagSet`] and the type behaviours it dispatches to.
///
/// Variants fall into two tiers. [`FlagError::UnsupportedKind`],
/// [`FlagError::KindMismatch`] and [`FlagError::Matches`] report wiring
/// mistakes in the integrating code and never arise from user input; see
/// [`FlagError::is_fatal`]. The remaining variants describe bad or missing
/// input and are meant to be shown to the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// No behaviour is registered for the flag's kind.
    #[error("flag {name:?}: unsupported type {kind}")]
    UnsupportedKind {
        /// Flag whose kind was looked up.
        name: String,
        /// Kind missing from the registry.
        kind: Kind,
    },

    /// A behaviour registered for one kind was handed a flag of another.
    #[error("flag {name:?} is a {found}, but was handled as a {expected}")]
    KindMismatch {
        /// Flag being handled.
        name: String,
        /// Kind the behaviour operates on.
        expected: Kind,
        /// Kind of the flag's destination.
        found: Kind,
    },

    /// The parsed matches do not contain the flag, or hold a different type.
    #[error("flag {name:?} is not part of the parsed command: {source}")]
    Matches {
        /// Flag that was read back from the matches.
        name: String,
        /// Error reported by clap.
        #[source]
        source: MatchesError,
    },

    /// A required flag ended up at its zero value.
    #[error("required value {name:?} not specified")]
    Missing {
        /// Flag left unset.
        name: String,
    },

    /// The command line could not be parsed.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Several errors were collected in one pass.
    #[error("multiple flag errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl From<clap::Error> for FlagError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}

//! Capabilities shared by every scalar type a flag can bind to.

use clap::Arg;

use crate::{Destination, Kind, Slot};

/// A scalar type that can back a flag.
///
/// Implementations live alongside the type family they describe (see the
/// `types` module) and provide everything the generic bind, apply and
/// validate behaviours need: the zero value, parsing shared by the
/// environment and the command line, rendering for help text, and the
/// projection into and out of the tagged [`Destination`].
pub trait FlagValue: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Registry key for this type.
    const KIND: Kind;

    /// The unset sentinel used by required-value checks.
    fn zero() -> Self;

    /// Parses a raw command-line or environment value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when `raw` is not a valid value.
    fn parse_flag(raw: &str) -> Result<Self, String>;

    /// Renders the value the way it would be typed on the command line.
    fn render(&self) -> String;

    /// Configures how clap accepts this value.
    ///
    /// The default takes exactly one value through [`FlagValue::parse_flag`].
    #[must_use]
    fn configure(arg: Arg) -> Arg {
        arg.num_args(1).value_parser(Self::parse_flag)
    }

    /// Returns `true` when the value equals [`FlagValue::zero`].
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Wraps a typed slot in its [`Destination`] variant.
    fn wrap(slot: Slot<'_, Self>) -> Destination<'_>;

    /// Borrows the typed slot when `destination` holds this type.
    fn project<'d, 'a>(destination: &'d Destination<'a>) -> Option<&'d Slot<'a, Self>>;

    /// Mutably borrows the typed slot when `destination` holds this type.
    fn project_mut<'d, 'a>(destination: &'d mut Destination<'a>)
    -> Option<&'d mut Slot<'a, Self>>;
}

//! Built-in flag types.
//!
//! Each module implements [`crate::FlagValue`] for one family of scalars and
//! registers its behaviours. [`register_builtin`] is the single place that
//! decides which families exist and in what order they are registered.

use crate::TypeRegistry;

/// Implements the [`crate::FlagValue`] destination projections for a
/// [`crate::Destination`] variant.
macro_rules! destination_access {
    ($variant:ident) => {
        fn wrap(slot: $crate::Slot<'_, Self>) -> $crate::Destination<'_> {
            $crate::Destination::$variant(slot)
        }

        fn project<'d, 'a>(
            destination: &'d $crate::Destination<'a>,
        ) -> Option<&'d $crate::Slot<'a, Self>> {
            match destination {
                $crate::Destination::$variant(slot) => Some(slot),
                _ => None,
            }
        }

        fn project_mut<'d, 'a>(
            destination: &'d mut $crate::Destination<'a>,
        ) -> Option<&'d mut $crate::Slot<'a, Self>> {
            match destination {
                $crate::Destination::$variant(slot) => Some(slot),
                _ => None,
            }
        }
    };
}

mod boolean;
mod duration;
mod float;
mod signed;
mod string;
mod unsigned;

/// Registers every built-in type with `registry`.
pub(crate) fn register_builtin(registry: &mut TypeRegistry) {
    boolean::register(registry);
    string::register(registry);
    signed::register(registry);
    unsigned::register(registry);
    float::register(registry);
    duration::register(registry);
}

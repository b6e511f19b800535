//! Signed integer flags of every width.

use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(Kind::Int8, TypeBehavior::of::<i8>());
    registry.register(Kind::Int16, TypeBehavior::of::<i16>());
    registry.register(Kind::Int32, TypeBehavior::of::<i32>());
    registry.register(Kind::Int64, TypeBehavior::of::<i64>());
    registry.register(Kind::Int, TypeBehavior::of::<isize>());
}

macro_rules! signed_flag_value {
    ($($ty:ty => $kind:ident),+ $(,)?) => {$(
        impl FlagValue for $ty {
            const KIND: Kind = Kind::$kind;

            fn zero() -> Self {
                0
            }

            fn parse_flag(raw: &str) -> Result<Self, String> {
                raw.trim()
                    .parse()
                    .map_err(|err| format!("invalid {} {raw:?}: {err}", Kind::$kind))
            }

            fn render(&self) -> String {
                self.to_string()
            }

            fn configure(arg: clap::Arg) -> clap::Arg {
                arg.num_args(1)
                    .allow_negative_numbers(true)
                    .value_parser(Self::parse_flag)
            }

            destination_access!($kind);
        }
    )+};
}

signed_flag_value!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
);

//! Floating-point flags.

use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(Kind::Float32, TypeBehavior::of::<f32>());
    registry.register(Kind::Float64, TypeBehavior::of::<f64>());
}

macro_rules! float_flag_value {
    ($($ty:ty => $kind:ident),+ $(,)?) => {$(
        impl FlagValue for $ty {
            const KIND: Kind = Kind::$kind;

            fn zero() -> Self {
                0.0
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

float_flag_value!(f32 => Float32, f64 => Float64);

//! Unsigned integer flags of every width.

use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(Kind::Uint8, TypeBehavior::of::<u8>());
    registry.register(Kind::Uint16, TypeBehavior::of::<u16>());
    registry.register(Kind::Uint32, TypeBehavior::of::<u32>());
    registry.register(Kind::Uint64, TypeBehavior::of::<u64>());
    registry.register(Kind::Uint, TypeBehavior::of::<usize>());
}

macro_rules! unsigned_flag_value {
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

            destination_access!($kind);
        }
    )+};
}

unsigned_flag_value!(
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
);

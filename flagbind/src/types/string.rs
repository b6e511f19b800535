//! String flags.

use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(Kind::String, TypeBehavior::of::<String>());
}

impl FlagValue for String {
    const KIND: Kind = Kind::String;

    fn zero() -> Self {
        Self::new()
    }

    fn parse_flag(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    destination_access!(String);
}

//! Duration flags, written in `humantime` syntax such as `90s` or `1m 30s`.

use std::time::Duration;

use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(Kind::Duration, TypeBehavior::of::<Duration>());
}

impl FlagValue for Duration {
    const KIND: Kind = Kind::Duration;

    fn zero() -> Self {
        Self::ZERO
    }

    fn parse_flag(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed == "0" {
            return Ok(Self::ZERO);
        }
        humantime::parse_duration(trimmed).map_err(|err| format!("invalid duration {raw:?}: {err}"))
    }

    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }

    destination_access!(Duration);
}

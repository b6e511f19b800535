//! Boolean flags.
//!
//! A bare `--flag` sets `true`; `--flag=false` is also accepted. Required
//! checks always pass because `false` is a legitimate value that cannot be
//! told apart from an unset flag.

use clap::Arg;

use crate::registry::{accept_any_value, apply_value, bind_value};
use crate::{FlagValue, Kind, TypeBehavior, TypeRegistry};

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register(
        Kind::Bool,
        TypeBehavior::new(
            bind_value::<bool>,
            apply_value::<bool>,
            accept_any_value::<bool>,
        ),
    );
}

impl FlagValue for bool {
    const KIND: Kind = Kind::Bool;

    fn zero() -> Self {
        false
    }

    fn parse_flag(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(format!("invalid boolean {other:?}")),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn configure(arg: Arg) -> Arg {
        arg.num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_parser(Self::parse_flag)
    }

    destination_access!(Bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case(" true ", true)]
    #[case("0", false)]
    #[case("F", false)]
    #[case("false", false)]
    fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(bool::parse_flag(raw), Ok(expected));
    }

    #[rstest]
    #[case("yes")]
    #[case("tRuE")]
    #[case("")]
    fn rejects_other_spellings(#[case] raw: &str) {
        assert!(bool::parse_flag(raw).is_err());
    }
}

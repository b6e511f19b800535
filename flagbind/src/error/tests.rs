//! Unit tests for error classification and aggregation.

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::{FlagError, is_display_request};
use crate::Kind;

fn build_error(kind: ErrorKind) -> clap::Error {
    Command::new("demo").error(kind, "demo output")
}

#[rstest]
#[case(ErrorKind::DisplayHelp)]
#[case(ErrorKind::DisplayVersion)]
fn recognises_display_requests(#[case] kind: ErrorKind) {
    assert!(is_display_request(&build_error(kind)));
}

#[rstest]
#[case(ErrorKind::UnknownArgument)]
#[case(ErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ErrorKind) {
    assert!(!is_display_request(&build_error(kind)));
}

#[test]
fn empty_input_aggregates_to_none() {
    assert!(FlagError::try_aggregate(Vec::new()).is_none());
}

#[test]
fn single_error_is_returned_unwrapped() {
    let err = FlagError::try_aggregate(vec![FlagError::missing("db-host")]);
    assert!(matches!(err, Some(FlagError::Missing { ref name }) if name == "db-host"));
}

#[test]
fn aggregate_keeps_order_and_numbers_lines() {
    let err = FlagError::aggregate(vec![
        FlagError::missing("db-user"),
        FlagError::missing("db-name"),
    ]);
    assert_eq!(
        err.to_string(),
        "multiple flag errors:\n1: required value \"db-user\" not specified\n2: required value \"db-name\" not specified"
    );
    assert_eq!(err.missing_names(), ["db-user", "db-name"]);
}

#[test]
fn missing_message_quotes_the_name() {
    assert_eq!(
        FlagError::missing("db-host").to_string(),
        "required value \"db-host\" not specified"
    );
}

#[rstest]
#[case(FlagError::UnsupportedKind { name: "x".into(), kind: Kind::Duration }, true)]
#[case(
    FlagError::KindMismatch { name: "x".into(), expected: Kind::Bool, found: Kind::String },
    true
)]
#[case(FlagError::missing("x"), false)]
#[case(FlagError::from(build_error(ErrorKind::UnknownArgument)), false)]
fn classifies_fatal_errors(#[case] err: FlagError, #[case] fatal: bool) {
    assert_eq!(err.is_fatal(), fatal);
}

#[test]
#[should_panic(expected = "aggregate requires at least one error")]
fn aggregate_panics_on_empty_input() {
    let _ = FlagError::aggregate(Vec::new());
}

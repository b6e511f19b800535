//! Classification of clap errors surfaced through [`super::FlagError`].

use clap::{Error as ClapError, error::ErrorKind};

/// Returns `true` when `err` is clap answering `--help` or `--version`.
///
/// [`crate::FlagSet::parse_from`] reports these as
/// [`super::FlagError::CliParsing`]; entry points should call
/// [`clap::Error::exit`] on them to print the text and exit with status zero.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

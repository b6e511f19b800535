//! Error types produced while binding, parsing and validating flags.

mod aggregate;
mod constructors;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use helpers::is_display_request;
pub use types::FlagError;

#[cfg(test)]
mod tests;

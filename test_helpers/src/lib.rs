//! Test helpers shared across the flagbind workspace.
//!
//! Flags read the process environment while they are bound, so tests that
//! set variables must not race each other. The [`env`] module serialises
//! those mutations and restores the previous state when a guard drops.

pub mod env;

//! Command implementations for the sluice CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! sluice library crates for actual implementation.

pub mod check;

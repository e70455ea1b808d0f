//! Shared utilities.
//!
//! Lexical path helpers used by the root search and grouping, plus test helpers.

pub mod path;

#[cfg(test)]
pub mod testutil;

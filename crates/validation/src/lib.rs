//! Validation of normalized trading commands.
//!
//! Validation never fails: findings are returned as data in a
//! [`intent_core::ValidationOutcome`] and callers branch on `valid`.

pub mod command;

pub use command::{validate, validated};

//! Pattern matching for Aptos addresses.
//!
//! An address matches when it starts with the configured prefix and ends
//! with the configured suffix. Either side may be omitted.

mod pattern;

pub use pattern::{matches, MatchResult, Pattern};

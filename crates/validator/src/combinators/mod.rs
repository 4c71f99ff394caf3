//! Combinators for composing validators
//!
//! - [`And`]: both validators must pass, left first
//! - [`Each`]: every element of a slice is checked, all failures reported

pub mod and;
pub mod each;

pub use and::{And, and};
pub use each::{Each, collect_each, each};

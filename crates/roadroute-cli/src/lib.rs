//! roadroute CLI library.
//!
//! This crate provides the pieces of the `roadroute` binary that are worth
//! testing in isolation: argument parsing, terminal styling and output
//! formatting.

pub mod args;
pub mod output;
pub mod terminal;

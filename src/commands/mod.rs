//! Command implementations

pub mod simple;

pub use simple::{SimpleCommand, run_simple};

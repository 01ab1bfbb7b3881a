//! Terminal output formatting
//!
//! History line rendering shared by every shell, plus pretty-printing for the
//! simple CLI.

pub mod display;
pub mod formatters;

pub use display::{print_difficulties, print_notice, print_round_over, print_view};

//! Guess the Number
//!
//! A number-guessing game with a terminal UI. Every finished round is saved
//! once to a CSV file or a remote table.
//!
//! # Quick Start
//!
//! ```rust
//! use guess_number::core::{Difficulty, GameSession, GuessOutcome, Outcome};
//!
//! let mut session = GameSession::with_secret(Difficulty::Medium.profile(), 250);
//! assert_eq!(session.evaluate_guess(100).unwrap(), GuessOutcome::TooLow);
//! assert_eq!(session.evaluate_guess(250).unwrap(), GuessOutcome::Win);
//!
//! let record = session.finalize_result("  ").unwrap().unwrap();
//! assert_eq!(record.outcome, Outcome::Win);
//! assert_eq!(record.attempts_used, 2);
//! assert_eq!(record.alias, "Anónimo");
//! ```

// Core domain types
pub mod core;

// Per-client controllers and the session registry
pub mod game;

// Result sinks
pub mod persistence;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

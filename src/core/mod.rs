//! Core domain types for the guessing game
//!
//! The rules of a round live here: the difficulty catalog, the per-round
//! session state machine and the record it produces. Nothing in this module
//! does I/O.

mod difficulty;
mod error;
mod record;
mod session;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::GameError;
pub use record::{DEFAULT_ALIAS, Outcome, ResultRecord, normalize_alias};
pub use session::{GameSession, GuessOutcome, HistoryEntry};

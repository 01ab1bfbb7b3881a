//! Game rule errors

use thiserror::Error;

/// Errors raised by the game rules and the controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Guess outside `[1, range_max]`
    #[error("Guess {guess} is out of range, pick a number between 1 and {range_max}")]
    InputOutOfRange { guess: u32, range_max: u32 },

    /// The round already ended
    #[error("The round is over, start a new one to keep playing")]
    GameOver,

    /// A result was requested for a round still in progress
    #[error("The round is still in progress")]
    NotOver,

    #[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

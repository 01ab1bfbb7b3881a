//! Per-round game state
//!
//! A `GameSession` holds the secret, the remaining attempts and the guess
//! history of one round. It moves from active to over exactly once and is
//! never reused: a new round always builds a fresh session.

use super::record::{Outcome, ResultRecord, normalize_alias};
use super::{DifficultyProfile, GameError};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Classification tag stored with every history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess below the secret, a higher number is needed
    TooLow,
    /// Guess above the secret, a lower number is needed
    TooHigh,
    /// Guess equal to the secret
    Win,
    /// Attempts exhausted, the entry value is the revealed secret
    Lose,
}

/// One line of the round history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub outcome: GuessOutcome,
    /// The guess, or the secret for a [`GuessOutcome::Lose`] entry
    pub value: u32,
}

impl HistoryEntry {
    const fn new(outcome: GuessOutcome, value: u32) -> Self {
        Self { outcome, value }
    }
}

/// State of a single round
#[derive(Debug, Clone)]
pub struct GameSession {
    profile: DifficultyProfile,
    secret: u32,
    attempts_left: u32,
    history: Vec<HistoryEntry>,
    game_over: bool,
    result_recorded: bool,
}

impl GameSession {
    /// Start a round, drawing the secret uniformly from `[1, range_max]`
    ///
    /// # Panics
    ///
    /// Panics if `profile.range_max` is 0.
    pub fn create<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> Self {
        assert!(profile.range_max > 0, "secret range must not be empty");
        let secret = rng.random_range(1..=profile.range_max);
        Self::with_secret(profile, secret)
    }

    /// Start a round with a known secret
    ///
    /// Used for replays and tests; the secret is not range-checked.
    #[must_use]
    pub const fn with_secret(profile: &DifficultyProfile, secret: u32) -> Self {
        Self {
            profile: *profile,
            secret,
            attempts_left: profile.max_attempts,
            history: Vec::new(),
            game_over: false,
            result_recorded: false,
        }
    }

    /// Apply one guess to the round
    ///
    /// Consumes one attempt, also on the winning guess. A correct guess ends
    /// the round as a win even when it used the last attempt. The guess is
    /// not range-checked here.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] if the round already ended; the session
    /// is left untouched.
    pub fn evaluate_guess(&mut self, guess: u32) -> Result<GuessOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        self.attempts_left = self.attempts_left.saturating_sub(1);

        let outcome = match guess.cmp(&self.secret) {
            std::cmp::Ordering::Equal => {
                self.game_over = true;
                GuessOutcome::Win
            }
            std::cmp::Ordering::Less => GuessOutcome::TooLow,
            std::cmp::Ordering::Greater => GuessOutcome::TooHigh,
        };
        self.history.push(HistoryEntry::new(outcome, guess));

        // Win check above runs first, so exhaustion never overrides a win
        if self.attempts_left == 0 && !self.game_over {
            self.history
                .push(HistoryEntry::new(GuessOutcome::Lose, self.secret));
            self.game_over = true;
        }

        Ok(outcome)
    }

    /// Build the result record for a finished round, once
    ///
    /// Marks the session as recorded before returning, so any later call
    /// returns `Ok(None)` whatever happens to the record afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotOver`] while the round is still active.
    pub fn finalize_result(&mut self, alias: &str) -> Result<Option<ResultRecord>, GameError> {
        self.finalize_result_at(alias, Utc::now())
    }

    /// [`GameSession::finalize_result`] with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotOver`] while the round is still active.
    pub fn finalize_result_at(
        &mut self,
        alias: &str,
        played_at: DateTime<Utc>,
    ) -> Result<Option<ResultRecord>, GameError> {
        if !self.game_over {
            return Err(GameError::NotOver);
        }
        if self.result_recorded {
            return Ok(None);
        }
        self.result_recorded = true;

        Ok(Some(ResultRecord {
            played_at,
            alias: normalize_alias(alias),
            outcome: self.outcome(),
            attempts_used: self.attempts_used(),
            max_attempts: self.profile.max_attempts,
            range_max: self.profile.range_max,
            difficulty_label: self.profile.label.to_string(),
        }))
    }

    /// Outcome derived from the tag of the last history entry
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.history.last() {
            Some(entry) if entry.outcome == GuessOutcome::Win => Outcome::Win,
            _ => Outcome::Lose,
        }
    }

    /// Profile this round was created from
    #[inline]
    #[must_use]
    pub const fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    #[inline]
    #[must_use]
    pub const fn range_max(&self) -> u32 {
        self.profile.range_max
    }

    #[inline]
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.profile.max_attempts
    }

    #[inline]
    #[must_use]
    pub const fn difficulty_label(&self) -> &'static str {
        self.profile.label
    }

    #[inline]
    #[must_use]
    pub const fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    #[inline]
    #[must_use]
    pub const fn attempts_used(&self) -> u32 {
        self.profile.max_attempts - self.attempts_left
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.result_recorded
    }

    /// The secret, only once the round is over
    #[must_use]
    pub const fn revealed_secret(&self) -> Option<u32> {
        if self.game_over {
            Some(self.secret)
        } else {
            None
        }
    }
}

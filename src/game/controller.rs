//! Per-client game controller
//!
//! Wraps the current [`GameSession`] with the operations a UI shell needs:
//! picking a difficulty, starting or resetting a round, submitting guesses and
//! playing again. When a round ends the controller builds its result record
//! and hands it to the sink exactly once.

use crate::core::{Difficulty, GameError, GameSession, GuessOutcome, Outcome};
use crate::output::formatters::history_line;
use crate::persistence::ResultSink;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Outcome of the single attempt to persist a finished round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveNotice {
    Saved { destination: String },
    Failed { detail: String },
}

impl SaveNotice {
    /// User-facing message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "Game saved ✅",
            Self::Failed { .. } => "Could not save the game.",
        }
    }

    /// Raw error detail for a failed save
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Saved { .. } => None,
            Self::Failed { detail } => Some(detail),
        }
    }

    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Read-only snapshot of what a shell renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Difficulty currently selected for the next start/reset
    pub selected: Difficulty,
    pub difficulty_label: &'static str,
    pub range_max: u32,
    pub attempts_left: u32,
    pub max_attempts: u32,
    /// History rendered as glyph-prefixed lines, oldest first
    pub lines: Vec<String>,
    pub game_over: bool,
    /// Present once the round is over
    pub outcome: Option<Outcome>,
    pub notice: Option<SaveNotice>,
}

/// Game state owned by one client
#[derive(Debug)]
pub struct GameController {
    selected: Difficulty,
    session: GameSession,
    rng: StdRng,
    notice: Option<SaveNotice>,
}

impl GameController {
    /// Create a controller with an OS-seeded RNG and a first round
    #[must_use]
    pub fn new(selected: Difficulty) -> Self {
        Self::with_rng(selected, StdRng::from_os_rng())
    }

    /// Create a controller whose secrets are reproducible
    #[must_use]
    pub fn with_seed(selected: Difficulty, seed: u64) -> Self {
        Self::with_rng(selected, StdRng::seed_from_u64(seed))
    }

    fn with_rng(selected: Difficulty, mut rng: StdRng) -> Self {
        let session = GameSession::create(selected.profile(), &mut rng);
        Self {
            selected,
            session,
            rng,
            notice: None,
        }
    }

    /// Replace the current round with one whose secret is known
    #[cfg(test)]
    pub(crate) fn replace_session(&mut self, session: GameSession) {
        self.session = session;
        self.notice = None;
    }

    #[must_use]
    pub const fn selected(&self) -> Difficulty {
        self.selected
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&SaveNotice> {
        self.notice.as_ref()
    }

    /// Change the selection; the running round is not affected
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
    }

    /// Start a fresh round with the selected difficulty
    pub fn start_or_reset(&mut self) {
        let profile = *self.selected.profile();
        self.reset_with(&profile);
    }

    /// Start a fresh round with the difficulty of the current round
    pub fn play_again(&mut self) {
        let profile = *self.session.profile();
        self.reset_with(&profile);
    }

    fn reset_with(&mut self, profile: &crate::core::DifficultyProfile) {
        self.session = GameSession::create(profile, &mut self.rng);
        self.notice = None;
        log::info!(
            "new round: {} (1-{}, {} attempts)",
            profile.label,
            profile.range_max,
            profile.max_attempts
        );
    }

    /// Submit a guess from the input collaborator
    ///
    /// When the guess ends the round the result is recorded through `sink`.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the round already ended
    /// - [`GameError::InputOutOfRange`] if `value` is outside `[1, range_max]`;
    ///   no attempt is consumed
    pub fn submit_guess(
        &mut self,
        value: u32,
        alias: &str,
        sink: &dyn ResultSink,
    ) -> Result<GuessOutcome, GameError> {
        if self.session.is_over() {
            return Err(GameError::GameOver);
        }
        let range_max = self.session.range_max();
        if !(1..=range_max).contains(&value) {
            return Err(GameError::InputOutOfRange {
                guess: value,
                range_max,
            });
        }

        let outcome = self.session.evaluate_guess(value)?;
        log::debug!(
            "guess {value} -> {outcome:?}, {} attempts left",
            self.session.attempts_left()
        );

        if self.session.is_over() {
            self.record_result(alias, sink);
        }
        Ok(outcome)
    }

    /// Persist the finished round, at most once per session
    ///
    /// Safe to call repeatedly: only the first call on a finished round
    /// reaches the sink. A failed save is reported and never retried.
    /// Returns the save notice of the round, or `None` while it is active.
    pub fn record_result(&mut self, alias: &str, sink: &dyn ResultSink) -> Option<&SaveNotice> {
        let Ok(finalized) = self.session.finalize_result(alias) else {
            return None;
        };

        if let Some(record) = finalized {
            let notice = match sink.append(&record) {
                Ok(()) => {
                    log::info!(
                        "saved {} for '{}' after {}/{} attempts",
                        record.outcome,
                        record.alias,
                        record.attempts_used,
                        record.max_attempts
                    );
                    SaveNotice::Saved {
                        destination: sink.describe(),
                    }
                }
                Err(err) => {
                    log::warn!("could not save result to {}: {err}", sink.describe());
                    SaveNotice::Failed {
                        detail: err.to_string(),
                    }
                }
            };
            self.notice = Some(notice);
        }

        self.notice.as_ref()
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn view(&self) -> SessionView {
        let session = &self.session;
        SessionView {
            selected: self.selected,
            difficulty_label: session.difficulty_label(),
            range_max: session.range_max(),
            attempts_left: session.attempts_left(),
            max_attempts: session.max_attempts(),
            lines: session.history().iter().map(history_line).collect(),
            game_over: session.is_over(),
            outcome: session.is_over().then(|| session.outcome()),
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResultRecord;
    use crate::persistence::PersistenceError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        records: RefCell<Vec<ResultRecord>>,
        fail: bool,
    }

    impl ResultSink for RecordingSink {
        fn append(&self, record: &ResultRecord) -> Result<(), PersistenceError> {
            self.records.borrow_mut().push(record.clone());
            if self.fail {
                Err(PersistenceError::Http {
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn controller_with_secret(difficulty: Difficulty, secret: u32) -> GameController {
        let mut controller = GameController::with_seed(difficulty, 1);
        controller.replace_session(GameSession::with_secret(difficulty.profile(), secret));
        controller
    }

    #[test]
    fn first_round_uses_selected_difficulty() {
        let controller = GameController::with_seed(Difficulty::Hard, 3);
        let view = controller.view();
        assert_eq!(view.range_max, 1000);
        assert_eq!(view.attempts_left, 5);
        assert_eq!(view.difficulty_label, "DIFICIL");
        assert!(!view.game_over);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn winning_round_is_saved_once() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Medium, 250);

        controller.submit_guess(100, "ana", &sink).unwrap();
        controller.submit_guess(400, "ana", &sink).unwrap();
        assert_eq!(
            controller.submit_guess(250, "ana", &sink),
            Ok(GuessOutcome::Win)
        );

        let view = controller.view();
        assert_eq!(
            view.lines,
            vec![
                "⬆️ 100 is too low",
                "⬇️ 400 is too high",
                "✅ You got it: 250"
            ]
        );
        assert_eq!(view.attempts_left, 3);
        assert_eq!(view.outcome, Some(Outcome::Win));
        assert!(view.notice.as_ref().is_some_and(SaveNotice::is_saved));

        // A re-render calling the record path again must not write twice
        controller.record_result("ana", &sink);
        controller.record_result("ana", &sink);

        let records = sink.records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attempts_used, 3);
        assert_eq!(records[0].alias, "ana");
    }

    #[test]
    fn failed_save_is_reported_and_not_retried() {
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let mut controller = controller_with_secret(Difficulty::Easy, 10);
        controller.submit_guess(10, "", &sink).unwrap();

        let notice = controller.notice().cloned().unwrap();
        assert_eq!(notice.message(), "Could not save the game.");
        assert_eq!(notice.detail(), Some("HTTP error: connection refused"));
        assert!(controller.session().is_recorded());

        controller.record_result("", &sink);
        assert_eq!(sink.records.borrow().len(), 1);
    }

    #[test]
    fn out_of_range_guess_consumes_no_attempt() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Easy, 10);

        assert_eq!(
            controller.submit_guess(0, "", &sink),
            Err(GameError::InputOutOfRange {
                guess: 0,
                range_max: 100
            })
        );
        assert_eq!(
            controller.submit_guess(101, "", &sink),
            Err(GameError::InputOutOfRange {
                guess: 101,
                range_max: 100
            })
        );
        assert_eq!(controller.session().attempts_left(), 7);
    }

    #[test]
    fn guess_after_round_over_is_refused() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Easy, 10);
        controller.submit_guess(10, "", &sink).unwrap();

        assert_eq!(
            controller.submit_guess(10, "", &sink),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn record_result_on_active_round_does_nothing() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Easy, 10);
        assert!(controller.record_result("ana", &sink).is_none());
        assert!(sink.records.borrow().is_empty());
        assert!(!controller.session().is_recorded());
    }

    #[test]
    fn choose_difficulty_does_not_touch_running_round() {
        let mut controller = controller_with_secret(Difficulty::Medium, 250);
        controller.choose_difficulty(Difficulty::Hard);

        let view = controller.view();
        assert_eq!(view.selected, Difficulty::Hard);
        assert_eq!(view.range_max, 500);
    }

    #[test]
    fn start_or_reset_uses_selection() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Medium, 250);
        controller.submit_guess(100, "", &sink).unwrap();
        controller.choose_difficulty(Difficulty::Easy);
        controller.start_or_reset();

        let view = controller.view();
        assert_eq!(view.range_max, 100);
        assert_eq!(view.attempts_left, 7);
        assert!(view.lines.is_empty());
        assert!(view.notice.is_none());
    }

    #[test]
    fn play_again_keeps_finished_round_difficulty() {
        let sink = RecordingSink::default();
        let mut controller = controller_with_secret(Difficulty::Hard, 999);
        controller.choose_difficulty(Difficulty::Easy);
        controller.submit_guess(999, "", &sink).unwrap();

        controller.play_again();

        let view = controller.view();
        assert_eq!(view.range_max, 1000);
        assert_eq!(view.max_attempts, 5);
        assert!(!view.game_over);
        assert!(!controller.session().is_recorded());
        assert!(view.notice.is_none());
    }

    #[test]
    fn seeded_controllers_draw_same_secrets() {
        let sink = RecordingSink::default();
        let mut a = GameController::with_seed(Difficulty::Easy, 99);
        let mut b = GameController::with_seed(Difficulty::Easy, 99);

        for _ in 0..7 {
            let _ = a.submit_guess(1, "", &sink);
            let _ = b.submit_guess(1, "", &sink);
        }
        assert_eq!(
            a.session().revealed_secret(),
            b.session().revealed_secret()
        );
    }
}

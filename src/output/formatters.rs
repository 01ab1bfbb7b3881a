//! Formatting utilities for history lines and status text

use crate::core::{GuessOutcome, HistoryEntry};

/// Glyph shown in front of a history line
#[must_use]
pub const fn outcome_glyph(outcome: GuessOutcome) -> &'static str {
    match outcome {
        GuessOutcome::TooLow => "⬆️",
        GuessOutcome::TooHigh => "⬇️",
        GuessOutcome::Win => "✅",
        GuessOutcome::Lose => "❌",
    }
}

/// Render one history entry as display text
#[must_use]
pub fn history_line(entry: &HistoryEntry) -> String {
    let glyph = outcome_glyph(entry.outcome);
    match entry.outcome {
        GuessOutcome::TooLow => format!("{glyph} {} is too low", entry.value),
        GuessOutcome::TooHigh => format!("{glyph} {} is too high", entry.value),
        GuessOutcome::Win => format!("{glyph} You got it: {}", entry.value),
        GuessOutcome::Lose => {
            format!("{glyph} Out of attempts. The number was {}.", entry.value)
        }
    }
}

/// Range and attempts summary, e.g. `Range: 1 - 500 | Attempts: 4 / 6`
#[must_use]
pub fn status_line(range_max: u32, attempts_left: u32, max_attempts: u32) -> String {
    format!("Range: 1 - {range_max} | Attempts: {attempts_left} / {max_attempts}")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value as usize * width / max as usize).min(width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

//! Display functions for the simple CLI

use super::formatters::{create_progress_bar, status_line};
use crate::core::{Difficulty, Outcome};
use crate::game::{SaveNotice, SessionView};
use colored::Colorize;

/// Print the range/attempts header and the history
pub fn print_view(view: &SessionView) {
    println!("{}", "─".repeat(60).cyan());
    println!(
        "{}  [{}]",
        status_line(view.range_max, view.attempts_left, view.max_attempts).bold(),
        create_progress_bar(view.attempts_left, view.max_attempts, view.max_attempts as usize)
            .yellow()
    );
    println!("{}", "─".repeat(60).cyan());

    if view.lines.is_empty() {
        println!("  {}", "No guesses yet.".bright_black());
    } else {
        println!("History:");
        for line in &view.lines {
            println!("  - {line}");
        }
    }
}

/// Print the end-of-round banner with the save notice
pub fn print_round_over(view: &SessionView) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match view.outcome {
        Some(Outcome::Win) => println!(
            "{}",
            format!(
                "    🎉 Round over: you won in {} of {} attempts! 🎉",
                view.max_attempts - view.attempts_left,
                view.max_attempts
            )
            .bright_green()
            .bold()
        ),
        _ => println!("{}", "    Round over ✅".bright_yellow().bold()),
    }
    println!("{}", "═".repeat(60).bright_cyan());

    if let Some(notice) = &view.notice {
        print_notice(notice);
    }
}

/// Print the result of the save attempt
pub fn print_notice(notice: &SaveNotice) {
    if notice.is_saved() {
        println!("  {}", notice.message().green());
    } else {
        println!("  {}", notice.message().red().bold());
        if let Some(detail) = notice.detail() {
            println!("  {}", detail.bright_black());
        }
    }
}

/// Print the difficulty catalog, marking the current selection
pub fn print_difficulties(selected: Difficulty) {
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let marker = if *difficulty == selected { "▶" } else { " " };
        println!(
            "  {marker} {}. {} ({})",
            i + 1,
            difficulty,
            difficulty.key().bright_black()
        );
    }
}

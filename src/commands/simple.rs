//! Simple interactive CLI mode
//!
//! Text-based game loop without TUI

use crate::core::{Difficulty, GameError};
use crate::game::{LOCAL_CLIENT, SessionRegistry};
use crate::output::{print_difficulties, print_round_over, print_view};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleCommand {
    Guess(u32),
    Choose(Difficulty),
    ListDifficulties,
    Reset,
    PlayAgain,
    Quit,
    Invalid(String),
}

impl SimpleCommand {
    /// Parse a line typed by the player
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_lowercase();
        let mut parts = input.split_whitespace();

        match (parts.next(), parts.next()) {
            (Some("quit" | "q" | "exit"), None) => Self::Quit,
            (Some("new" | "n" | "reset" | "start"), None) => Self::Reset,
            (Some("again" | "a" | "yes" | "y"), None) => Self::PlayAgain,
            (Some("difficulty" | "d"), None) => Self::ListDifficulties,
            (Some("difficulty" | "d"), Some(key)) => match key.parse() {
                Ok(difficulty) => Self::Choose(difficulty),
                Err(err) => Self::Invalid(err.to_string()),
            },
            (Some(word), None) => word
                .parse::<u32>()
                .map_or_else(|_| Self::Invalid(format!("Not a number: {word}")), Self::Guess),
            _ => Self::Invalid(format!("Unknown command: {input}")),
        }
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(registry: &mut SessionRegistry, alias: &str) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Guess the Number - Simple Mode               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Pick a difficulty and play. Results are saved to {}.\n", registry.sink_description());
    println!("Commands: a number to guess, 'd <easy|medium|hard>' to pick a difficulty,");
    println!("          'new' to start over, 'again' after a round, 'quit' to exit\n");

    let view = registry.view(LOCAL_CLIENT);
    print_difficulties(view.selected);
    println!();
    print_view(&view);

    loop {
        let game_over = registry.view(LOCAL_CLIENT).game_over;
        let prompt = if game_over {
            "Play again? (again/new/quit)"
        } else {
            "Your number"
        };

        let Some(line) = get_user_input(prompt)? else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };

        match SimpleCommand::parse(&line) {
            SimpleCommand::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            SimpleCommand::ListDifficulties => {
                print_difficulties(registry.view(LOCAL_CLIENT).selected);
            }
            SimpleCommand::Choose(difficulty) => {
                registry.choose_difficulty(LOCAL_CLIENT, difficulty);
                println!("Selected {difficulty}. Type 'new' to start a round with it.");
            }
            SimpleCommand::Reset => {
                registry.start_or_reset(LOCAL_CLIENT);
                println!("\n🔄 New round started!\n");
                print_view(&registry.view(LOCAL_CLIENT));
            }
            SimpleCommand::PlayAgain if game_over => {
                registry.play_again(LOCAL_CLIENT);
                println!("\n🔄 New round started!\n");
                print_view(&registry.view(LOCAL_CLIENT));
            }
            SimpleCommand::PlayAgain => {
                println!("The round is still running, keep guessing!");
            }
            SimpleCommand::Guess(value) => {
                match registry.submit_guess(LOCAL_CLIENT, value, alias) {
                    Ok(_) => {
                        let view = registry.view(LOCAL_CLIENT);
                        print_view(&view);
                        if view.game_over {
                            print_round_over(&view);
                        }
                    }
                    Err(GameError::GameOver) => {
                        println!("{}", "The round is over. Type 'again' or 'new'.".yellow());
                    }
                    Err(err) => println!("{} {err}", "❌".red()),
                }
            }
            SimpleCommand::Invalid(message) => println!("{} {message}", "❌".red()),
        }
    }
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

//! TUI application state and logic

use crate::core::{Difficulty, GameError, Outcome};
use crate::game::{LOCAL_CLIENT, SessionRegistry, SessionView};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Longest guess the input box accepts, in digits
const MAX_INPUT_DIGITS: usize = 4;

/// Application state
pub struct App {
    pub registry: SessionRegistry,
    pub alias: String,
    pub input_buffer: String,
    pub alias_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guess,
    Alias,
    RoundOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64 * 100.0
        }
    }
}

impl App {
    #[must_use]
    pub fn new(registry: SessionRegistry, alias: impl Into<String>) -> Self {
        let mut app = Self {
            registry,
            alias: alias.into(),
            input_buffer: String::new(),
            alias_buffer: String::new(),
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Guess,
        };
        let view = app.view();
        app.add_message("Welcome! Pick a difficulty and start guessing.", MessageStyle::Info);
        app.add_message(
            &format!("I'm thinking of a number between 1 and {}.", view.range_max),
            MessageStyle::Info,
        );
        app
    }

    /// Current session snapshot
    pub fn view(&mut self) -> SessionView {
        self.registry.view(LOCAL_CLIENT)
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Guess => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') => self.start_or_reset(),
                KeyCode::Char('d') | KeyCode::Tab => self.cycle_difficulty(),
                KeyCode::Char('e') => self.begin_alias_edit(),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if self.input_buffer.len() < MAX_INPUT_DIGITS {
                        self.input_buffer.push(c);
                    }
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => self.submit_input(),
                _ => {}
            },
            InputMode::RoundOver => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('a') | KeyCode::Enter => self.play_again(),
                KeyCode::Char('n') => self.start_or_reset(),
                KeyCode::Char('d') | KeyCode::Tab => self.cycle_difficulty(),
                _ => {}
            },
            InputMode::Alias => match key.code {
                KeyCode::Esc => {
                    self.alias_buffer.clear();
                    self.input_mode = InputMode::Guess;
                    self.add_message("Alias unchanged", MessageStyle::Info);
                }
                KeyCode::Enter => {
                    self.alias = std::mem::take(&mut self.alias_buffer);
                    self.input_mode = InputMode::Guess;
                    let shown = crate::core::normalize_alias(&self.alias);
                    self.add_message(&format!("Playing as {shown}"), MessageStyle::Success);
                }
                KeyCode::Backspace => {
                    self.alias_buffer.pop();
                }
                KeyCode::Char(c) => self.alias_buffer.push(c),
                _ => {}
            },
        }
    }

    fn begin_alias_edit(&mut self) {
        self.alias_buffer = self.alias.clone();
        self.input_mode = InputMode::Alias;
        self.add_message("Type your alias, Enter to confirm", MessageStyle::Info);
    }

    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        let Ok(value) = input.parse::<u32>() else {
            self.add_message("Type a number first!", MessageStyle::Error);
            return;
        };

        match self.registry.submit_guess(LOCAL_CLIENT, value, &self.alias) {
            Ok(_) => {
                let view = self.view();
                if let Some(line) = view.lines.last() {
                    self.add_message(line, MessageStyle::Info);
                }
                if view.game_over {
                    self.finish_round(&view);
                }
            }
            Err(GameError::GameOver) => self.input_mode = InputMode::RoundOver,
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    fn finish_round(&mut self, view: &SessionView) {
        self.stats.total_games += 1;
        if view.outcome == Some(Outcome::Win) {
            self.stats.games_won += 1;
            self.add_message("🎉 Round won!", MessageStyle::Success);
        } else {
            self.add_message("Round over ✅", MessageStyle::Info);
        }

        if let Some(notice) = &view.notice {
            let style = if notice.is_saved() {
                MessageStyle::Success
            } else {
                MessageStyle::Error
            };
            self.add_message(notice.message(), style);
            if let Some(detail) = notice.detail() {
                self.add_message(detail, MessageStyle::Error);
            }
        }

        self.input_mode = InputMode::RoundOver;
    }

    pub fn start_or_reset(&mut self) {
        self.registry.start_or_reset(LOCAL_CLIENT);
        self.new_round_message();
    }

    pub fn play_again(&mut self) {
        self.registry.play_again(LOCAL_CLIENT);
        self.new_round_message();
    }

    fn new_round_message(&mut self) {
        self.input_buffer.clear();
        self.input_mode = InputMode::Guess;
        let view = self.view();
        self.add_message(
            &format!(
                "New round! 1 - {} with {} attempts",
                view.range_max, view.max_attempts
            ),
            MessageStyle::Info,
        );
    }

    /// Select the next difficulty; applies on the next start/reset
    pub fn cycle_difficulty(&mut self) {
        let next = self.selected().next();
        self.registry.choose_difficulty(LOCAL_CLIENT, next);
        self.add_message(
            &format!("Selected {next}, press 'n' to start it"),
            MessageStyle::Info,
        );
    }

    #[must_use]
    pub fn selected(&self) -> Difficulty {
        self.registry
            .controller(LOCAL_CLIENT)
            .map_or_else(Difficulty::default, crate::game::GameController::selected)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 6 messages
        if self.messages.len() > 6 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("TUI loop failed: {err}");
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        let view = app.view();
        terminal.draw(|f| super::rendering::ui(f, &app, &view))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, ResultRecord};
    use crate::persistence::{PersistenceError, ResultSink};

    struct NullSink;

    impl ResultSink for NullSink {
        fn append(&self, _record: &ResultRecord) -> Result<(), PersistenceError> {
            Ok(())
        }

        fn describe(&self) -> String {
            "null".to_string()
        }
    }

    struct BrokenSink;

    impl ResultSink for BrokenSink {
        fn append(&self, _record: &ResultRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Config {
                message: "disk full".to_string(),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn app_with(sink: Box<dyn ResultSink>, secret: u32) -> App {
        let registry = SessionRegistry::new(sink, Difficulty::Medium).with_seed(11);
        let mut app = App::new(registry, "ana");
        app.registry.replace_session(
            LOCAL_CLIENT,
            GameSession::with_secret(Difficulty::Medium.profile(), secret),
        );
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_guess(app: &mut App, digits: &str) {
        for c in digits.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn digits_fill_input_buffer() {
        let mut app = app_with(Box::new(NullSink), 250);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_buffer, "12");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input_buffer, "1");
    }

    #[test]
    fn winning_guess_switches_to_round_over() {
        let mut app = app_with(Box::new(NullSink), 250);
        type_guess(&mut app, "100");
        assert_eq!(app.input_mode, InputMode::Guess);
        type_guess(&mut app, "250");

        assert_eq!(app.input_mode, InputMode::RoundOver);
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 1);
        assert!(app.messages.iter().any(|m| m.text == "Game saved ✅"));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Guess);
        assert!(!app.view().game_over);
    }

    #[test]
    fn save_failure_is_shown_with_detail() {
        let mut app = app_with(Box::new(BrokenSink), 250);
        type_guess(&mut app, "250");

        assert!(app
            .messages
            .iter()
            .any(|m| m.text == "Could not save the game." && m.style == MessageStyle::Error));
        assert!(app.messages.iter().any(|m| m.text.contains("disk full")));
        assert_eq!(app.input_mode, InputMode::RoundOver);
    }

    #[test]
    fn out_of_range_guess_shows_error() {
        let mut app = app_with(Box::new(NullSink), 250);
        type_guess(&mut app, "9999");

        let last = app.messages.last().unwrap();
        assert_eq!(last.style, MessageStyle::Error);
        assert_eq!(app.view().attempts_left, 6);
    }

    #[test]
    fn cycle_then_reset_changes_range() {
        let mut app = app_with(Box::new(NullSink), 250);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.selected(), Difficulty::Hard);
        assert_eq!(app.view().range_max, 500);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.view().range_max, 1000);
    }

    #[test]
    fn alias_edit_updates_alias() {
        let mut app = app_with(Box::new(NullSink), 250);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::Alias);
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "Luis".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.alias, "Luis");
        assert_eq!(app.input_mode, InputMode::Guess);
    }

    #[test]
    fn quit_keys() {
        let mut app = app_with(Box::new(NullSink), 250);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}

//! TUI rendering with ratatui

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Difficulty, Outcome};
use crate::game::SessionView;
use crate::output::formatters::status_line;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App, view: &SessionView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Round
            Constraint::Percentage(40), // Side panel
        ])
        .split(chunks[1]);

    render_round_panel(f, view, main_chunks[0]);
    render_side_panel(f, app, view, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎯 GUESS THE NUMBER")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_round_panel(f: &mut Frame, view: &SessionView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let title = if view.game_over {
        Span::styled(
            "Round over ✅",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("In progress", Style::default().fg(Color::Yellow))
    };

    let summary = Paragraph::new(vec![
        Line::from(vec![Span::raw("Round: "), title]),
        Line::from(status_line(
            view.range_max,
            view.attempts_left,
            view.max_attempts,
        )),
    ])
    .block(
        Block::default()
            .title(format!(" {} ", view.difficulty_label))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(summary, chunks[0]);

    let items: Vec<ListItem> = view
        .lines
        .iter()
        .map(|line| ListItem::new(format!("- {line}")))
        .collect();
    let history =
        List::new(items).block(Block::default().title(" History ").borders(Borders::ALL));
    f.render_widget(history, chunks[1]);
}

fn render_side_panel(f: &mut Frame, app: &App, view: &SessionView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Attempts gauge
            Constraint::Length(5), // Difficulty selector
            Constraint::Min(3),    // Messages
        ])
        .split(area);

    render_attempts(f, view, chunks[0]);
    render_difficulties(f, view.selected, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_attempts(f: &mut Frame, view: &SessionView, area: Rect) {
    let percent = if view.max_attempts == 0 {
        0
    } else {
        (view.attempts_left * 100 / view.max_attempts) as u16
    };

    let color = match view.outcome {
        Some(Outcome::Win) => Color::Green,
        Some(Outcome::Lose) => Color::Red,
        None => Color::Cyan,
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Attempts Left ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(format!("{} / {}", view.attempts_left, view.max_attempts));

    f.render_widget(gauge, area);
}

fn render_difficulties(f: &mut Frame, selected: Difficulty, area: Rect) {
    let items: Vec<ListItem> = Difficulty::ALL
        .iter()
        .map(|difficulty| {
            if *difficulty == selected {
                ListItem::new(format!("▶ {difficulty}")).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {difficulty}"))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Difficulty (d) ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Guess => (
            " Your number | Enter to guess ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::Alias => (
            " Your alias | Enter to confirm, ESC to cancel ",
            app.alias_buffer.as_str(),
            Color::Cyan,
        ),
        InputMode::RoundOver => (
            " Press 'a' to play again, 'n' for a new round, 'q' to quit ",
            "",
            Color::Green,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let alias = Paragraph::new(format!(
        "Player: {}",
        crate::core::normalize_alias(&app.alias)
    ))
    .alignment(Alignment::Center);
    f.render_widget(alias, chunks[0]);

    let stats = Paragraph::new(format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate()
    ))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help_text = match app.input_mode {
        InputMode::RoundOver => "q: Quit | a: Again | n: New | d: Difficulty",
        InputMode::Alias => "Enter: Confirm | ESC: Cancel",
        InputMode::Guess => "q: Quit | n: New | d: Difficulty | e: Alias",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{LOCAL_CLIENT, SessionRegistry};
    use crate::persistence::CsvSink;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_range_and_difficulty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("runs.csv"));
        let registry = SessionRegistry::new(Box::new(sink), Difficulty::Medium).with_seed(1);
        let mut app = App::new(registry, "ana");
        let view = app.registry.view(LOCAL_CLIENT);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app, &view)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Range: 1 - 500 | Attempts: 6 / 6"));
        assert!(text.contains("MEDIO"));
        assert!(text.contains("Player: ana"));
    }
}

//! UI rendering using ratatui
//!
//! Screens:
//! - Menu: category picker
//! - Playing: the board, or the level summary once it finishes
//! - Error: content fault display

use crate::app::{App, AppCoordinator, FeedbackKind, MenuOption, RoundSummary, Screen};
use crate::game::{GroupedWord, Status, Tile, TileId};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Menu { selected } => render_menu(frame, *selected),
        Screen::Playing { app } => render_game(frame, app),
        Screen::Error { message } => render_error(frame, message),
    }
}

fn render_menu(frame: &mut Frame, selected: usize) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(1), // Prompt
            Constraint::Min(8),    // Categories
            Constraint::Length(2), // Description
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = r#"
 ____  _            _    __        __            _
| __ )| | ___   ___| | __\ \      / /__  _ __ __| |___
|  _ \| |/ _ \ / __| |/ / \ \ /\ / / _ \| '__/ _` / __|
| |_) | | (_) | (__|   <   \ V  V / (_) | | | (_| \__ \
|____/|_|\___/ \___|_|\_\   \_/\_/ \___/|_|  \__,_|___/
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    let prompt = Paragraph::new("Pick a category")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(prompt, layout[1]);

    let options = MenuOption::all();
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", prefix, opt.label())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), centered(layout[2], 30));

    let description = options.get(selected).map(MenuOption::description).unwrap_or_default();
    let description = Paragraph::new(description)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(description, layout[3]);

    let footer = Paragraph::new("↑↓ Navigate  Enter Play  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

fn render_game(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: logo, category, timer
            Constraint::Min(0),    // Board or summary
        ])
        .split(area);

    render_header(frame, layout[0], app);

    if app.is_round_over() {
        render_end_summary(frame, layout[1], &app.round_summary());
    } else {
        render_board(frame, layout[1], app);
    }
}

fn render_error(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .margin(2)
        .split(area);

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error, layout[1]);

    let hint = Paragraph::new("Press Esc to go back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(20),    // Category and level
            Constraint::Length(10), // Timer
        ])
        .split(inner);

    let logo = Paragraph::new("BLOCK WORDS")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let state = app.state();
    let title = format!("{} - Level {}", state.category().to_uppercase(), state.level());
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, header_layout[1]);

    let remaining = state.time_remaining();
    let timer_color = if remaining <= 10 {
        Color::Red
    } else if remaining <= 30 {
        Color::Yellow
    } else {
        Color::Green
    };
    let timer = Paragraph::new(format_timer(remaining))
        .style(Style::default().fg(timer_color).bold())
        .alignment(Alignment::Right);
    frame.render_widget(timer, header_layout[2]);
}

/// Columns taken by one rendered tile
const TILE_WIDTH: usize = 3;

/// Tiles, selection, grouped words, feedback and progress
fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();

    // Margin and border on both sides
    let per_row = tiles_per_row(area.width.saturating_sub(4));
    let rows: Vec<Line> = state
        .available_tiles()
        .chunks(per_row)
        .map(|row| tile_line(row, &app.hint_tiles))
        .collect();
    let tile_height = rows.len().max(1) as u16 + 2;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(tile_height), // Tiles
            Constraint::Length(1), // Selection
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Grouped words
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Key help
        ])
        .split(area);

    let tiles = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Blocks"),
        );
    frame.render_widget(tiles, layout[0]);

    let selection = if state.status() == Status::Waiting {
        "[ Press ENTER to start ]".to_string()
    } else {
        format!("> {}_", format_tiles(state.current_selection()))
    };
    let selection = Paragraph::new(selection).style(Style::default().fg(Color::White));
    frame.render_widget(selection, layout[1]);

    let grouped: Vec<ListItem> = state
        .grouped_words()
        .iter()
        .enumerate()
        .map(|(i, group)| grouped_item(i, group, &app.invalid_words))
        .collect();
    let grouped = List::new(grouped).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Words"),
    );
    frame.render_widget(grouped, layout[3]);

    let feedback = Paragraph::new(app.feedback.as_str())
        .style(Style::default().fg(feedback_color(app.feedback_kind)));
    frame.render_widget(feedback, layout[4]);

    let progress = format!(
        "Found {}/{}",
        state.discovered_words().len(),
        state.target_words().len()
    );
    let progress = Paragraph::new(progress).style(Style::default().fg(Color::Magenta).bold());
    frame.render_widget(progress, layout[5]);

    let help = Paragraph::new("a-z Select  Enter Submit  Tab Group  1-9 Ungroup  Bksp Reset  ? Hint  Esc Menu")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, layout[6]);
}

fn render_end_summary(frame: &mut Frame, area: Rect, summary: &RoundSummary) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Score
            Constraint::Length(1), // Completion
            Constraint::Length(1), // Time left
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Words
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Instructions
            Constraint::Min(0),
        ])
        .split(area);

    let (title, color) = if summary.level_complete {
        ("LEVEL COMPLETE!", Color::Green)
    } else {
        ("TIME'S UP!", Color::Red)
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, main_layout[0]);

    let score = Paragraph::new(format!("Score: {}", summary.score))
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(score, main_layout[2]);

    let completion = format!(
        "Words Found: {}/{} ({}%)",
        summary.words_found,
        summary.total_words,
        summary.completion_percent()
    );
    let completion = Paragraph::new(completion)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(completion, main_layout[3]);

    let time_left = Paragraph::new(format!(
        "Time Left: {} of {}",
        format_timer(summary.time_left),
        format_timer(summary.round_seconds)
    ))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(time_left, main_layout[4]);

    let words = Paragraph::new(summary.words.join(", ").to_uppercase())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(words, main_layout[6]);

    let instructions = if summary.level_complete {
        "N Next level  R Replay  Esc Menu"
    } else {
        "R Try again  Esc Menu"
    };
    let instructions = Paragraph::new(instructions)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, main_layout[8]);
}

/// Tiles that fit side by side in `width` columns (at least one)
fn tiles_per_row(width: u16) -> usize {
    (width as usize / TILE_WIDTH).max(1)
}

fn tile_line(tiles: &[Tile], hinted: &[TileId]) -> Line<'static> {
    let spans: Vec<Span> = tiles
        .iter()
        .map(|tile| {
            let style = if tile.is_used {
                Style::default().fg(Color::DarkGray)
            } else if hinted.contains(&tile.id) {
                Style::default().fg(Color::Black).bg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Cyan).bold()
            };
            Span::styled(format!(" {} ", tile.letter.to_ascii_uppercase()), style)
        })
        .collect();
    Line::from(spans)
}

fn grouped_item(index: usize, group: &GroupedWord, invalid: &[String]) -> ListItem<'static> {
    let style = if invalid.contains(&group.word) {
        Style::default().fg(Color::Red)
    } else if group.holds_tiles {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Green)
    };
    ListItem::new(format!("{}. {}", index + 1, group.word.to_uppercase())).style(style)
}

fn feedback_color(kind: FeedbackKind) -> Color {
    match kind {
        FeedbackKind::Info => Color::White,
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Error => Color::Red,
    }
}

/// Narrow `area` to a centred column
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Spell tiles as spaced capitals
fn format_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| t.letter.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the timer display
fn format_timer(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

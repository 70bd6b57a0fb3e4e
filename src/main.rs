//! Block Words - spell the hidden words of a category from shared letter tiles
//!
//! Pick a category, build words from the blocks, beat the clock.

use anyhow::{Context, Result};
use blockwords::app::{AppCoordinator, Screen};
use blockwords::config::GameConfig;
use blockwords::game::Status;
use blockwords::tui::{self, Tui};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Upper bound on how long to wait for input between redraws
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = GameConfig::from_env();

    // The game is playable without a log file
    let _guard = match setup_logging(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled: {e:#}");
            None
        }
    };
    tracing::info!(?config, "starting blockwords");

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut coordinator = AppCoordinator::new(config);
    let result = run(&mut terminal, &mut coordinator);

    terminal.exit()?;
    tracing::info!("exiting");
    result
}

fn run(terminal: &mut Tui, coordinator: &mut AppCoordinator) -> Result<()> {
    loop {
        terminal.draw(|frame| tui::render(frame, coordinator))?;

        let timeout = match &coordinator.screen {
            Screen::Playing { app } => app
                .ticker()
                .time_until_due(Instant::now())
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL)),
            _ => IDLE_POLL,
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(coordinator, key);
                }
            }
        }

        coordinator.poll(Instant::now());

        if coordinator.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(coordinator: &mut AppCoordinator, key: KeyEvent) {
    let now = Instant::now();
    match &coordinator.screen {
        Screen::Menu { .. } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => coordinator.menu_up(),
            KeyCode::Down | KeyCode::Char('j') => coordinator.menu_down(),
            KeyCode::Enter => coordinator.menu_select(now),
            KeyCode::Esc | KeyCode::Char('q') => coordinator.quit(),
            _ => {}
        },
        Screen::Error { .. } => {
            if key.code == KeyCode::Esc {
                coordinator.go_to_menu();
            }
        }
        Screen::Playing { app } => {
            if key.code == KeyCode::Esc {
                coordinator.go_to_menu();
                return;
            }
            if app.is_round_over() {
                match key.code {
                    KeyCode::Char('n') | KeyCode::Char('N') => {
                        coordinator.with_app(|app| app.next_level().map(|_| ()))
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => coordinator.with_app(|app| app.restart()),
                    _ => {}
                }
                return;
            }
            if app.state().status() == Status::Waiting {
                if key.code == KeyCode::Enter {
                    coordinator.with_app(|app| app.start(now));
                }
                return;
            }
            match key.code {
                KeyCode::Enter => coordinator.with_app(|app| app.on_submit()),
                KeyCode::Tab => coordinator.with_app(|app| app.on_group()),
                KeyCode::Backspace => coordinator.with_app(|app| app.on_backspace()),
                KeyCode::Char('?') => coordinator.with_app(|app| app.on_hint()),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    coordinator.with_app(|app| app.on_ungroup(index))
                }
                KeyCode::Char(c) if c.is_ascii_alphabetic() => coordinator.with_app(|app| app.on_char(c)),
                _ => {}
            }
        }
    }
}

/// Route tracing output to a log file so it never draws over the board
fn setup_logging(config: &GameConfig) -> Result<WorkerGuard> {
    let log_dir = match &config.log_dir {
        Some(dir) => dir.clone(),
        None => default_log_dir().context("no home directory for logs")?,
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "blockwords.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!("Log file: {}/blockwords.log", log_dir.display());
    Ok(guard)
}

fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blockwords").map(|dirs| dirs.data_local_dir().join("logs"))
}

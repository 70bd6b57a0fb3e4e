//! Application screen state management
//!
//! Handles transitions between different application screens:
//! - Main menu (category picker)
//! - Playing a level, including its end-of-level summary
//! - Error display for broken content

use std::time::Instant;

use crate::config::GameConfig;
use crate::game::dictionary::{self, Category};

use super::state::App;

/// Menu entry on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play(&'static Category),
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> Vec<MenuOption> {
        dictionary::categories()
            .iter()
            .map(MenuOption::Play)
            .chain(std::iter::once(MenuOption::Quit))
            .collect()
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play(category) => category.name,
            MenuOption::Quit => "Quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuOption::Play(category) => category.description,
            MenuOption::Quit => "",
        }
    }
}

/// The current application screen
pub enum Screen {
    /// Main menu
    Menu { selected: usize },
    /// Playing a level (summary shown once it finishes)
    Playing { app: App },
    /// Content or configuration fault
    Error { message: String },
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    config: GameConfig,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the menu
    pub fn new(config: GameConfig) -> Self {
        let selected = menu_index(&config.category);

        Self {
            screen: Screen::Menu { selected },
            should_quit: false,
            config,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Go back to the main menu, keeping the cursor on the last category played
    pub fn go_to_menu(&mut self) {
        let selected = match &self.screen {
            Screen::Playing { app } => menu_index(app.state().category()),
            _ => menu_index(&self.config.category),
        };
        self.screen = Screen::Menu { selected };
    }

    /// Handle menu navigation (up)
    pub fn menu_up(&mut self) {
        if let Screen::Menu { selected } = &mut self.screen {
            *selected = selected.saturating_sub(1);
        }
    }

    /// Handle menu navigation (down)
    pub fn menu_down(&mut self) {
        if let Screen::Menu { selected } = &mut self.screen {
            if *selected < MenuOption::all().len() - 1 {
                *selected += 1;
            }
        }
    }

    /// Handle menu selection (Enter)
    pub fn menu_select(&mut self, now: Instant) {
        let Screen::Menu { selected } = &self.screen else {
            return;
        };

        let option = MenuOption::all()[*selected];
        match option {
            MenuOption::Play(category) => self.play(category.id, now),
            MenuOption::Quit => self.should_quit = true,
        }
    }

    /// Deal the configured start level for `category` and start the clock
    pub fn play(&mut self, category: &str, now: Instant) {
        let started = App::new(&self.config, category, self.config.start_level).and_then(|mut app| {
            app.start(now)?;
            Ok(app)
        });
        self.screen = match started {
            Ok(app) => Screen::Playing { app },
            Err(e) => {
                tracing::error!(error = %e, "could not start level");
                Screen::Error {
                    message: e.to_string(),
                }
            }
        };
    }

    /// Apply a fallible app action, dropping to the error screen on a hard fault
    pub fn with_app<F>(&mut self, action: F)
    where
        F: FnOnce(&mut App) -> crate::error::Result<()>,
    {
        let Screen::Playing { app } = &mut self.screen else {
            return;
        };
        if let Err(e) = action(app) {
            tracing::error!(error = %e, "game fault");
            self.screen = Screen::Error {
                message: e.to_string(),
            };
        }
    }

    /// Poll for updates (call regularly)
    pub fn poll(&mut self, now: Instant) {
        self.with_app(|app| app.tick(now));
    }
}

/// Menu row of `category`, or the first row when it is not listed
fn menu_index(category: &str) -> usize {
    MenuOption::all()
        .iter()
        .position(|o| matches!(o, MenuOption::Play(c) if c.id.eq_ignore_ascii_case(category)))
        .unwrap_or(0)
}

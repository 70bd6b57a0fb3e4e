//! Application state, screens and the countdown driver

pub mod screen;
pub mod state;
pub mod timer;

pub use screen::{AppCoordinator, MenuOption, Screen};
pub use state::{App, FeedbackKind, RoundSummary};
pub use timer::Ticker;

//! Block Words - build the hidden words from a shared pool of letter tiles
//!
//! Find every target word before the clock runs out, or group the whole
//! board into words and let the game check them all at once.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod tui;

pub use error::{GameError, Result};

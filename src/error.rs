//! Hard faults raised by the game engine.
//!
//! Player mistakes (short words, wrong words, tapping a used tile) are not
//! errors; they come back as [`crate::game::Outcome`] values with a message.
//! The variants here mean the content or configuration is broken.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("category '{id}' not found")]
    CategoryNotFound { id: String },

    #[error("category '{id}' has no words")]
    EmptyCategory { id: String },

    #[error("word '{word}' is not a valid target (need 3+ letters a-z)")]
    InvalidWord { word: String },

    #[error("a level needs at least one target word")]
    NoTargets,
}

//! Selection validation
//!
//! Checks a tile selection against the level, in priority order:
//! - Something is selected
//! - Minimum length (3 letters)
//! - Spells one of the level's target words
//! - Word not already found
//! - Letters of the selection actually spell the word (with multiplicity)

use super::Tile;

/// Minimum word length for valid submissions
pub const MIN_WORD_LENGTH: usize = 3;

/// Result of selection validation with specific rejection reasons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCheck {
    /// Selection spells an undiscovered target word
    Valid { word: String },
    /// No tiles selected
    NoLetters,
    /// Fewer than 3 tiles
    TooShort { length: usize },
    /// Spelled word is not in this level's target set
    NotTargetWord { word: String },
    /// Target word already discovered
    AlreadyFound { word: String },
    /// Selected letters cannot spell the word
    CannotForm { word: String },
}

impl SelectionCheck {
    /// Returns true if the selection is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, SelectionCheck::Valid { .. })
    }

    /// Returns a user-friendly message
    pub fn message(&self) -> String {
        match self {
            SelectionCheck::Valid { .. } => "Valid word!".to_string(),
            SelectionCheck::NoLetters => "Please select some letters first!".to_string(),
            SelectionCheck::TooShort { .. } => {
                format!("Word must be at least {} letters long!", MIN_WORD_LENGTH)
            }
            SelectionCheck::NotTargetWord { .. } => {
                "Not a valid word in this category!".to_string()
            }
            SelectionCheck::AlreadyFound { .. } => "This word has already been found!".to_string(),
            SelectionCheck::CannotForm { .. } => {
                "Cannot form this word with the selected letters!".to_string()
            }
        }
    }
}

/// Join the letters of a selection into a lowercase word
pub fn spell(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.letter.to_ascii_lowercase()).collect()
}

/// Validate a selection against the level's targets and discoveries
pub fn validate_selection(
    tiles: &[Tile],
    target_words: &[String],
    discovered_words: &[String],
) -> SelectionCheck {
    if tiles.is_empty() {
        return SelectionCheck::NoLetters;
    }

    if tiles.len() < MIN_WORD_LENGTH {
        return SelectionCheck::TooShort {
            length: tiles.len(),
        };
    }

    let word = spell(tiles);

    if !target_words.iter().any(|t| t.eq_ignore_ascii_case(&word)) {
        return SelectionCheck::NotTargetWord { word };
    }

    if discovered_words.iter().any(|d| d.eq_ignore_ascii_case(&word)) {
        return SelectionCheck::AlreadyFound { word };
    }

    let letters: Vec<char> = tiles.iter().map(|t| t.letter).collect();
    if !can_form(&word, &letters) {
        return SelectionCheck::CannotForm { word };
    }

    SelectionCheck::Valid { word }
}

/// Check if all letters in word are available in rack (respecting multiplicity)
pub fn can_form(word: &str, rack: &[char]) -> bool {
    let mut available: Vec<char> = rack.iter().map(|c| c.to_ascii_lowercase()).collect();

    for c in word.chars().map(|c| c.to_ascii_lowercase()) {
        match available.iter().position(|&r| r == c) {
            Some(pos) => {
                available.swap_remove(pos);
            }
            None => return false,
        }
    }

    true
}

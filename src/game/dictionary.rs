//! Category word lists
//!
//! Ships a small built-in catalogue of themed word lists. Every word is
//! lowercase, alphabetic and at least three letters long, and every
//! category has enough words to fill the largest level.
//! Lookup by id is case-insensitive.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::validation::MIN_WORD_LENGTH;
use super::MAX_WORDS_PER_LEVEL;
use crate::error::{GameError, Result};

/// A themed list of candidate target words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub words: &'static [&'static str],
}

static CATALOGUE: [Category; 6] = [
    Category {
        id: "animals",
        name: "Animals",
        description: "Creatures great and small",
        words: &[
            "cat", "dog", "bird", "fish", "lion", "tiger", "horse", "mouse", "zebra", "panda",
            "whale", "eagle",
        ],
    },
    Category {
        id: "fruits",
        name: "Fruits",
        description: "Sweet things that grow on trees and vines",
        words: &[
            "apple", "pear", "plum", "grape", "lemon", "mango", "peach", "kiwi", "lime", "melon",
            "cherry", "fig",
        ],
    },
    Category {
        id: "colors",
        name: "Colors",
        description: "Every shade of the rainbow",
        words: &[
            "red", "blue", "green", "pink", "gold", "gray", "black", "white", "brown", "teal",
            "violet", "orange",
        ],
    },
    Category {
        id: "sports",
        name: "Sports",
        description: "Games played with balls, boards and bats",
        words: &[
            "golf", "polo", "judo", "chess", "rugby", "tennis", "hockey", "soccer", "boxing",
            "karate", "rowing", "darts",
        ],
    },
    Category {
        id: "food",
        name: "Food",
        description: "Things you would find in the kitchen",
        words: &[
            "bread", "rice", "soup", "cake", "pie", "egg", "milk", "honey", "pasta", "salad",
            "cheese", "jam",
        ],
    },
    Category {
        id: "weather",
        name: "Weather",
        description: "What the sky is up to today",
        words: &[
            "rain", "snow", "wind", "fog", "hail", "sun", "storm", "cloud", "frost", "sleet",
            "mist", "thunder",
        ],
    },
];

/// Index from lowercase id to catalogue entry
static BY_ID: Lazy<HashMap<&'static str, &'static Category>> =
    Lazy::new(|| CATALOGUE.iter().map(|c| (c.id, c)).collect());

/// All built-in categories in menu order.
pub fn categories() -> &'static [Category] {
    &CATALOGUE
}

/// Look up a built-in category by id (case-insensitive).
pub fn category(id: &str) -> Result<&'static Category> {
    let lower = id.to_lowercase();
    BY_ID
        .get(lower.as_str())
        .copied()
        .ok_or(GameError::CategoryNotFound { id: id.to_string() })
}

/// Source of candidate target words, keyed by category id.
///
/// An unknown id is a content fault and must be reported as
/// [`GameError::CategoryNotFound`], never papered over.
pub trait CategoryProvider {
    fn words_for_category(&self, id: &str) -> Result<Vec<String>>;
}

/// The compiled-in catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCategories;

impl CategoryProvider for BuiltinCategories {
    fn words_for_category(&self, id: &str) -> Result<Vec<String>> {
        let category = category(id)?;
        Ok(category.words.iter().map(|w| w.to_string()).collect())
    }
}

/// Check a content word: lowercase it and reject anything a level could not use.
pub fn normalize_word(word: &str) -> Result<String> {
    let lower = word.trim().to_lowercase();
    if lower.chars().count() < MIN_WORD_LENGTH || !lower.chars().all(|c| c.is_ascii_lowercase())
    {
        return Err(GameError::InvalidWord {
            word: word.to_string(),
        });
    }
    Ok(lower)
}

/// True if every built-in category can fill the largest level.
pub fn catalogue_is_complete() -> bool {
    CATALOGUE
        .iter()
        .all(|c| c.words.len() >= MAX_WORDS_PER_LEVEL)
}

//! Game logic: letter pools, level sizing, the state machine and hints

pub mod dictionary;
pub mod engine;
pub mod hint;
pub mod sound;
pub mod state;
pub mod validation;

pub use dictionary::{BuiltinCategories, Category, CategoryProvider};
pub use engine::{reduce, Command, Game, Outcome};
pub use hint::{find_hint, Hint};
pub use sound::{SoundEffect, SoundError, SoundSink};
pub use state::{BoardCheck, Finish, GameState, GroupedWord, Status};

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::fmt;

/// Default time budget for a level, in seconds.
pub const ROUND_SECONDS: u32 = 180;

/// Target words on the first level is `BASE_WORDS + 1`.
const BASE_WORDS: usize = 2;

/// No level ever asks for more words than this.
pub const MAX_WORDS_PER_LEVEL: usize = 8;

/// Number of target words on a level (levels start at 1).
pub fn words_per_level(level: u32) -> usize {
    (BASE_WORDS + level as usize).min(MAX_WORDS_PER_LEVEL)
}

/// Stable identifier of a tile within one level's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A single letter in the shared pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    /// Lowercase ASCII letter
    pub letter: char,
    pub is_used: bool,
}

/// The shuffled tiles for one level.
#[derive(Debug, Clone)]
pub struct LetterPool {
    tiles: Vec<Tile>,
}

impl LetterPool {
    /// Build a pool holding every letter occurrence of every target word.
    pub fn generate(words: &[String]) -> Self {
        Self::generate_with_rng(words, &mut rand::rng())
    }

    /// Build a pool using a specific RNG (for testing/seeding).
    ///
    /// Ids are assigned in word order before the Fisher-Yates shuffle, so a
    /// given seed always yields the same ids at the same positions.
    pub fn generate_with_rng<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Self {
        let mut tiles: Vec<Tile> = words
            .iter()
            .flat_map(|w| w.chars())
            .map(|c| c.to_ascii_lowercase())
            .enumerate()
            .map(|(i, letter)| Tile {
                id: TileId(i),
                letter,
                is_used: false,
            })
            .collect();
        tiles.shuffle(rng);
        Self { tiles }
    }

    /// Get the tiles in display order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    /// Get the pool size.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Display the pool as a string.
    pub fn as_string(&self) -> String {
        self.tiles.iter().map(|t| t.letter).collect()
    }
}

/// Draw `count` distinct words from a category list, without replacement.
///
/// Asking for more words than the list holds returns the whole list in
/// random order.
pub fn sample_targets<R: Rng + ?Sized>(candidates: &[String], count: usize, rng: &mut R) -> Vec<String> {
    candidates
        .choose_multiple(rng, count.min(candidates.len()))
        .cloned()
        .collect()
}

//! Authoritative state of one level
//!
//! A `GameState` is built when a level is dealt and replaced wholesale when
//! the level advances or restarts. Only [`super::engine::reduce`] produces
//! new states; everyone else reads through the accessors here.

use rand::Rng;
use std::collections::HashSet;

use super::dictionary::{normalize_word, CategoryProvider};
use super::{sample_targets, words_per_level, LetterPool, Tile, TileId};
use crate::error::{GameError, Result};

/// Owner recorded on grouped words (single local player)
pub const LOCAL_PLAYER: &str = "player1";

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Every target discovered, or the whole board grouped correctly
    Won,
    /// Timer reached zero
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Waiting,
    Playing,
    Finished(Finish),
}

/// A committed run of tiles. Not checked against the targets when created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedWord {
    pub id: u64,
    pub word: String,
    pub owner_id: String,
    /// Tile snapshots in selection order
    pub tiles: Vec<Tile>,
    /// Grouped words keep their tiles; submitted words hand them back.
    pub holds_tiles: bool,
}

/// Verdict of the whole-board check run after each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCheck {
    /// Some tiles are still free
    Incomplete,
    /// Every tile is grouped and every grouped word is a target
    Solved,
    /// Every tile is grouped but these words are not targets
    NeedsFixing { invalid_words: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) category: String,
    pub(crate) level: u32,
    pub(crate) words_per_level: usize,
    pub(crate) target_words: Vec<String>,
    pub(crate) discovered_words: Vec<String>,
    pub(crate) grouped_words: Vec<GroupedWord>,
    pub(crate) available_tiles: Vec<Tile>,
    pub(crate) current_selection: Vec<Tile>,
    pub(crate) time_remaining: u32,
    pub(crate) round_seconds: u32,
    pub(crate) status: Status,
    pub(crate) next_group_id: u64,
}

impl GameState {
    /// Deal a level: sample targets from the category and build the pool.
    pub fn deal<P, R>(
        provider: &P,
        category: &str,
        level: u32,
        round_seconds: u32,
        rng: &mut R,
    ) -> Result<Self>
    where
        P: CategoryProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let level = level.max(1);
        let candidates = provider.words_for_category(category)?;
        if candidates.is_empty() {
            return Err(GameError::EmptyCategory {
                id: category.to_string(),
            });
        }
        let targets = sample_targets(&candidates, words_per_level(level), rng);
        tracing::info!(
            category,
            level,
            words = targets.len(),
            "dealing level"
        );
        Self::with_targets(category, level, targets, round_seconds, rng)
    }

    /// Build a level from an explicit target list.
    ///
    /// Targets are lowercased and deduplicated, keeping first occurrence order.
    pub fn with_targets<R: Rng + ?Sized>(
        category: &str,
        level: u32,
        targets: Vec<String>,
        round_seconds: u32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut target_words: Vec<String> = Vec::with_capacity(targets.len());
        for word in &targets {
            let word = normalize_word(word)?;
            if !target_words.contains(&word) {
                target_words.push(word);
            }
        }
        if target_words.is_empty() {
            return Err(GameError::NoTargets);
        }

        let pool = LetterPool::generate_with_rng(&target_words, rng);
        tracing::debug!(pool = %pool.as_string(), "generated letter pool");

        Ok(Self {
            category: category.to_lowercase(),
            level: level.max(1),
            words_per_level: target_words.len(),
            target_words,
            discovered_words: Vec::new(),
            grouped_words: Vec::new(),
            available_tiles: pool.into_tiles(),
            current_selection: Vec::new(),
            time_remaining: round_seconds,
            round_seconds,
            status: Status::Waiting,
            next_group_id: 1,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn words_per_level(&self) -> usize {
        self.words_per_level
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn discovered_words(&self) -> &[String] {
        &self.discovered_words
    }

    pub fn grouped_words(&self) -> &[GroupedWord] {
        &self.grouped_words
    }

    /// The full pool for this level, in display order
    pub fn available_tiles(&self) -> &[Tile] {
        &self.available_tiles
    }

    pub fn current_selection(&self) -> &[Tile] {
        &self.current_selection
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn round_seconds(&self) -> u32 {
        self.round_seconds
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Finished(_))
    }

    pub fn is_won(&self) -> bool {
        self.status == Status::Finished(Finish::Won)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.available_tiles.iter().find(|t| t.id == id)
    }

    /// Tiles neither selected nor held by a group
    pub fn unused_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.available_tiles.iter().filter(|t| !t.is_used)
    }

    /// The letters of the current selection as a word
    pub fn selection_word(&self) -> String {
        super::validation::spell(&self.current_selection)
    }

    pub fn is_target(&self, word: &str) -> bool {
        self.target_words.iter().any(|t| t.eq_ignore_ascii_case(word))
    }

    /// Ids of tiles held by grouped words
    pub(crate) fn held_tile_ids(&self) -> HashSet<TileId> {
        self.grouped_words
            .iter()
            .filter(|g| g.holds_tiles)
            .flat_map(|g| g.tiles.iter().map(|t| t.id))
            .collect()
    }

    pub fn all_tiles_grouped(&self) -> bool {
        let held = self.held_tile_ids();
        self.available_tiles.iter().all(|t| held.contains(&t.id))
    }

    /// Whole-board check: only passes judgement once every tile is grouped.
    pub fn board_check(&self) -> BoardCheck {
        if !self.all_tiles_grouped() {
            return BoardCheck::Incomplete;
        }
        let invalid_words: Vec<String> = self
            .grouped_words
            .iter()
            .filter(|g| !self.is_target(&g.word))
            .map(|g| g.word.clone())
            .collect();
        if invalid_words.is_empty() {
            BoardCheck::Solved
        } else {
            BoardCheck::NeedsFixing { invalid_words }
        }
    }

    pub(crate) fn set_used(&mut self, ids: &HashSet<TileId>, used: bool) {
        for tile in self
            .available_tiles
            .iter_mut()
            .filter(|t| ids.contains(&t.id))
        {
            tile.is_used = used;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BuiltinCategories;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_deal_first_level() {
        let mut rng = StdRng::seed_from_u64(9);
        let state = GameState::deal(&BuiltinCategories, "animals", 1, 180, &mut rng).unwrap();

        assert_eq!(state.level(), 1);
        assert_eq!(state.target_words().len(), 3);
        assert_eq!(state.words_per_level(), 3);
        assert_eq!(state.status(), Status::Waiting);
        assert_eq!(state.time_remaining(), 180);
        let letters: usize = state.target_words().iter().map(|w| w.len()).sum();
        assert_eq!(state.available_tiles().len(), letters);
    }

    #[test]
    fn test_deal_caps_word_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let state = GameState::deal(&BuiltinCategories, "fruits", 12, 60, &mut rng).unwrap();
        assert_eq!(state.target_words().len(), 8);
    }

    #[test]
    fn test_deal_unknown_category() {
        let mut rng = StdRng::seed_from_u64(9);
        let err = GameState::deal(&BuiltinCategories, "planets", 1, 60, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::CategoryNotFound { .. }));
    }

    #[test]
    fn test_with_targets_normalizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let state =
            GameState::with_targets("Animals", 1, words(&["Cat", "cat", "DOG"]), 60, &mut rng)
                .unwrap();
        assert_eq!(state.target_words(), &["cat".to_string(), "dog".to_string()]);
        assert_eq!(state.category(), "animals");
        assert_eq!(state.available_tiles().len(), 6);
    }

    #[test]
    fn test_with_targets_rejects_bad_content() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            GameState::with_targets("x", 1, Vec::new(), 60, &mut rng),
            Err(GameError::NoTargets)
        ));
        assert!(matches!(
            GameState::with_targets("x", 1, words(&["ox"]), 60, &mut rng),
            Err(GameError::InvalidWord { .. })
        ));
    }

    #[test]
    fn test_board_check_incomplete_on_fresh_level() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::with_targets("x", 1, words(&["cat"]), 60, &mut rng).unwrap();
        assert!(!state.all_tiles_grouped());
        assert_eq!(state.board_check(), BoardCheck::Incomplete);
    }
}

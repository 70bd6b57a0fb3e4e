//! The game state machine
//!
//! [`reduce`] maps `(state, command)` to `(next state, outcome)` without
//! touching the input state. [`Game`] owns the current state, swaps in each
//! new one, and forwards the outcome's sound effects to its sink.
//!
//! Status moves `Waiting -> Playing -> Finished`. A finished level only
//! accepts `AdvanceLevel` (after a win) and `Restart`, both of which deal a
//! fresh state.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

use super::dictionary::{BuiltinCategories, CategoryProvider};
use super::hint::{find_hint, Hint};
use super::sound::{Silent, SoundEffect, SoundSink};
use super::state::{BoardCheck, Finish, GameState, GroupedWord, Status, LOCAL_PLAYER};
use super::validation::{spell, validate_selection};
use super::{Tile, TileId};
use crate::error::Result;

/// Everything the presentation layer can ask of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectTile(TileId),
    ResetSelection,
    /// Check the selection against the targets and record it if valid
    SubmitWord,
    /// Commit the selection unchecked; judged once the board is full
    GroupWord,
    UngroupWord(String),
    StartGame,
    AdvanceLevel,
    Restart,
    Tick,
    RequestHint,
}

/// Result descriptor returned for every command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub success: bool,
    /// Display text; empty for silently ignored commands
    pub message: String,
    pub is_game_finished: bool,
    /// Set by `GroupWord`
    pub board: Option<BoardCheck>,
    pub invalid_words: Vec<String>,
    pub words_found: usize,
    pub total_words: usize,
    pub time_left: u32,
    pub hint: Option<Hint>,
    pub effects: Vec<SoundEffect>,
}

impl Outcome {
    fn progress(state: &GameState) -> Self {
        Self {
            is_game_finished: state.is_finished(),
            words_found: state.discovered_words().len(),
            total_words: state.target_words().len(),
            time_left: state.time_remaining(),
            ..Default::default()
        }
    }

    fn accepted(state: &GameState, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::progress(state)
        }
    }

    fn rejected(state: &GameState, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            effects: vec![SoundEffect::Error],
            ..Self::progress(state)
        }
    }

    /// No-op: nothing changed and nothing to tell the player
    fn ignored(state: &GameState) -> Self {
        Self::progress(state)
    }

    fn with_effect(mut self, effect: SoundEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Builds fresh levels for `AdvanceLevel` and `Restart`.
pub trait Dealer {
    fn deal(&mut self, category: &str, level: u32) -> Result<GameState>;
}

/// Deals levels from a category provider with an injectable RNG.
#[derive(Debug, Clone)]
pub struct LevelDealer<P, R> {
    provider: P,
    rng: R,
    round_seconds: u32,
}

impl<P: CategoryProvider, R: Rng> LevelDealer<P, R> {
    pub fn new(provider: P, rng: R, round_seconds: u32) -> Self {
        Self {
            provider,
            rng,
            round_seconds,
        }
    }
}

impl<P: CategoryProvider, R: Rng> Dealer for LevelDealer<P, R> {
    fn deal(&mut self, category: &str, level: u32) -> Result<GameState> {
        GameState::deal(
            &self.provider,
            category,
            level,
            self.round_seconds,
            &mut self.rng,
        )
    }
}

/// Apply one command. Only dealing a new level can fail.
pub fn reduce(
    state: &GameState,
    command: Command,
    dealer: &mut dyn Dealer,
) -> Result<(GameState, Outcome)> {
    let step = match command {
        Command::SelectTile(id) => select_tile(state, id),
        Command::ResetSelection => reset_selection(state),
        Command::SubmitWord => submit_word(state),
        Command::GroupWord => group_word(state),
        Command::UngroupWord(word) => ungroup_word(state, &word),
        Command::StartGame => start_game(state),
        Command::Tick => tick(state),
        Command::RequestHint => request_hint(state),
        Command::AdvanceLevel => return advance_level(state, dealer),
        Command::Restart => {
            let next = dealer.deal(state.category(), state.level())?;
            let outcome = Outcome::accepted(&next, format!("Level {} restarted", next.level()));
            return Ok((next, outcome));
        }
    };
    Ok(step)
}

fn select_tile(state: &GameState, id: TileId) -> (GameState, Outcome) {
    if !state.is_playing() || state.time_remaining() == 0 {
        return (state.clone(), Outcome::ignored(state));
    }
    let Some(tile) = state.tile(id).copied() else {
        tracing::debug!(%id, "select ignored: unknown tile");
        return (state.clone(), Outcome::ignored(state));
    };
    if tile.is_used {
        return (state.clone(), Outcome::ignored(state));
    }

    let mut next = state.clone();
    next.set_used(&HashSet::from([id]), true);
    next.current_selection.push(Tile {
        is_used: true,
        ..tile
    });
    let outcome = Outcome::accepted(&next, "").with_effect(SoundEffect::TileSelect);
    (next, outcome)
}

fn reset_selection(state: &GameState) -> (GameState, Outcome) {
    if state.is_finished() || state.current_selection().is_empty() {
        return (state.clone(), Outcome::ignored(state));
    }

    let mut next = state.clone();
    let held = next.held_tile_ids();
    let release: HashSet<TileId> = next
        .current_selection
        .drain(..)
        .map(|t| t.id)
        .filter(|id| !held.contains(id))
        .collect();
    next.set_used(&release, false);

    let outcome = Outcome::accepted(&next, "Selection cleared").with_effect(SoundEffect::TileDeselect);
    (next, outcome)
}

/// Shared guard for submit and group
fn check_can_commit(state: &GameState) -> Option<Outcome> {
    if state.time_remaining() == 0 {
        return Some(Outcome::rejected(state, "Time is up!"));
    }
    if !state.is_playing() {
        return Some(Outcome::rejected(state, "Game is not in progress"));
    }
    None
}

fn commit_selection(next: &mut GameState, word: String, holds_tiles: bool) {
    let tiles = std::mem::take(&mut next.current_selection);
    next.grouped_words.push(GroupedWord {
        id: next.next_group_id,
        word: word.clone(),
        owner_id: LOCAL_PLAYER.to_string(),
        tiles,
        holds_tiles,
    });
    next.next_group_id += 1;
    next.discovered_words.push(word);
}

fn submit_word(state: &GameState) -> (GameState, Outcome) {
    if let Some(rejection) = check_can_commit(state) {
        return (state.clone(), rejection);
    }

    let check = validate_selection(
        state.current_selection(),
        state.target_words(),
        state.discovered_words(),
    );
    if !check.is_valid() {
        tracing::debug!(?check, "submit rejected");
        return (state.clone(), Outcome::rejected(state, check.message()));
    }

    let mut next = state.clone();
    let released: HashSet<TileId> = next.current_selection.iter().map(|t| t.id).collect();
    commit_selection(&mut next, spell(state.current_selection()), false);
    next.set_used(&released, false);

    let finished = next.discovered_words.len() == next.target_words.len();
    if finished {
        next.status = Status::Finished(Finish::Won);
    }
    tracing::info!(
        word = next.discovered_words.last().map(String::as_str),
        found = next.discovered_words.len(),
        total = next.target_words.len(),
        "word found"
    );

    let effect = if finished {
        SoundEffect::GameComplete
    } else {
        SoundEffect::WordComplete
    };
    let outcome = Outcome::accepted(&next, "Word found!").with_effect(effect);
    (next, outcome)
}

fn group_word(state: &GameState) -> (GameState, Outcome) {
    if let Some(rejection) = check_can_commit(state) {
        return (state.clone(), rejection);
    }
    if state.current_selection().is_empty() {
        return (
            state.clone(),
            Outcome::rejected(state, "Please select some letters first!"),
        );
    }

    let mut next = state.clone();
    let held: HashSet<TileId> = next.current_selection.iter().map(|t| t.id).collect();
    let word = spell(state.current_selection());
    commit_selection(&mut next, word.clone(), true);
    next.set_used(&held, true);
    tracing::debug!(%word, "word grouped");

    let check = next.board_check();
    let mut outcome = match &check {
        BoardCheck::Incomplete => {
            Outcome::accepted(&next, "Word grouped!").with_effect(SoundEffect::WordComplete)
        }
        BoardCheck::Solved => {
            next.status = Status::Finished(Finish::Won);
            tracing::info!(level = next.level, "board solved");
            Outcome::accepted(&next, "Congratulations! All words are correct!")
                .with_effect(SoundEffect::GameComplete)
        }
        BoardCheck::NeedsFixing { invalid_words } => {
            tracing::info!(?invalid_words, "board full with incorrect words");
            let mut outcome = Outcome::accepted(
                &next,
                format!(
                    "All blocks used! However, some words are incorrect: {}. Please fix them to win!",
                    invalid_words.join(", ")
                ),
            )
            .with_effect(SoundEffect::Error);
            outcome.invalid_words = invalid_words.clone();
            outcome
        }
    };
    outcome.board = Some(check);
    (next, outcome)
}

fn ungroup_word(state: &GameState, word: &str) -> (GameState, Outcome) {
    if state.is_finished() {
        return (
            state.clone(),
            Outcome::rejected(state, "Game is not in progress"),
        );
    }
    let Some(index) = state
        .grouped_words()
        .iter()
        .position(|g| g.word.eq_ignore_ascii_case(word))
    else {
        tracing::warn!(word, "ungroup ignored: word not found");
        return (state.clone(), Outcome::ignored(state));
    };

    let mut next = state.clone();
    let group = next.grouped_words.remove(index);
    if let Some(pos) = next
        .discovered_words
        .iter()
        .position(|d| d.eq_ignore_ascii_case(&group.word))
    {
        next.discovered_words.remove(pos);
    }
    if group.holds_tiles {
        let ids: HashSet<TileId> = group.tiles.iter().map(|t| t.id).collect();
        next.set_used(&ids, false);
    }

    let outcome = Outcome::accepted(&next, format!("Returned \"{}\" to blocks", group.word))
        .with_effect(SoundEffect::TileDeselect);
    (next, outcome)
}

fn start_game(state: &GameState) -> (GameState, Outcome) {
    if state.is_finished() {
        return (
            state.clone(),
            Outcome::rejected(state, "Level is over - advance or restart"),
        );
    }
    let mut next = state.clone();
    next.status = Status::Playing;
    next.time_remaining = next.round_seconds;
    tracing::info!(level = next.level, seconds = next.round_seconds, "level started");
    let outcome = Outcome::accepted(&next, "Go!");
    (next, outcome)
}

fn tick(state: &GameState) -> (GameState, Outcome) {
    if !state.is_playing() || state.time_remaining() == 0 {
        return (state.clone(), Outcome::ignored(state));
    }

    let mut next = state.clone();
    next.time_remaining -= 1;
    if next.time_remaining > 0 {
        let outcome = Outcome::accepted(&next, "");
        return (next, outcome);
    }

    next.status = Status::Finished(Finish::TimedOut);
    tracing::info!(
        found = next.discovered_words.len(),
        total = next.target_words.len(),
        "time is up"
    );
    let outcome = Outcome::accepted(&next, "TIME'S UP!").with_effect(SoundEffect::Error);
    (next, outcome)
}

fn request_hint(state: &GameState) -> (GameState, Outcome) {
    let outcome = match find_hint(state) {
        Some(hint) => {
            let mut outcome = Outcome::accepted(
                state,
                format!("Hint: Try forming \"{}\"!", hint.word.to_uppercase()),
            )
            .with_effect(SoundEffect::Hint);
            outcome.hint = Some(hint);
            outcome
        }
        None => Outcome::rejected(
            state,
            "No hints available! Try ungrouping some words or keep playing.",
        ),
    };
    (state.clone(), outcome)
}

fn advance_level(state: &GameState, dealer: &mut dyn Dealer) -> Result<(GameState, Outcome)> {
    if !state.is_won() {
        return Ok((
            state.clone(),
            Outcome::rejected(state, "Finish the level first!"),
        ));
    }
    let next = dealer.deal(state.category(), state.level() + 1)?;
    let outcome = Outcome::accepted(&next, format!("Level {}", next.level()));
    Ok((next, outcome))
}

/// Owns the live state, the level dealer and the sound collaborator.
pub struct Game<D = LevelDealer<BuiltinCategories, StdRng>> {
    state: GameState,
    dealer: D,
    sounds: Box<dyn SoundSink>,
}

impl<D: Dealer> Game<D> {
    /// Deal the first level and wait for `StartGame`.
    pub fn new(mut dealer: D, category: &str, level: u32) -> Result<Self> {
        let state = dealer.deal(category, level)?;
        Ok(Self {
            state,
            dealer,
            sounds: Box::new(Silent),
        })
    }

    /// Replace the sound collaborator
    pub fn with_sounds(mut self, sounds: impl SoundSink + 'static) -> Self {
        self.sounds = Box::new(sounds);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run a command, commit the new state, then fire its effects.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let (next, outcome) = reduce(&self.state, command, &mut self.dealer)?;
        self.state = next;
        for effect in &outcome.effects {
            if let Err(e) = self.sounds.play(*effect) {
                tracing::warn!(effect = effect.name(), error = %e, "sound effect failed");
            }
        }
        Ok(outcome)
    }
}

//! Presentation state for a level in progress
//!
//! `App` wraps a [`Game`] with what the screen needs on top of the engine:
//! the last feedback line, hinted tiles, the words flagged by the board
//! check, and the countdown driver. Key handlers translate input into
//! engine commands.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use super::timer::Ticker;
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::engine::LevelDealer;
use crate::game::sound::{Silent, TerminalBell};
use crate::game::{BuiltinCategories, Command, Game, GameState, Outcome, SoundEffect, TileId};

/// How the feedback line should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackKind {
    #[default]
    Info,
    Success,
    Error,
}

/// End-of-level summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundSummary {
    pub category: String,
    pub level: u32,
    pub words_found: usize,
    pub total_words: usize,
    pub time_left: u32,
    /// The level's full time budget
    pub round_seconds: u32,
    /// True only when the level was won
    pub level_complete: bool,
    /// 100 points per grouped word
    pub score: u32,
    /// Grouped words in the order they were made
    pub words: Vec<String>,
}

/// Points per collected word
pub const POINTS_PER_WORD: u32 = 100;

impl RoundSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            category: state.category().to_string(),
            level: state.level(),
            words_found: state.discovered_words().len(),
            total_words: state.target_words().len(),
            time_left: state.time_remaining(),
            round_seconds: state.round_seconds(),
            level_complete: state.is_won(),
            score: state.grouped_words().len() as u32 * POINTS_PER_WORD,
            words: state.grouped_words().iter().map(|g| g.word.clone()).collect(),
        }
    }

    /// Share of targets found, rounded to a whole percent
    pub fn completion_percent(&self) -> u32 {
        if self.total_words == 0 {
            return 0;
        }
        ((self.words_found as f64 / self.total_words as f64) * 100.0).round() as u32
    }
}

/// Main application state for one play session
pub struct App {
    game: Game,
    ticker: Ticker,
    /// Feedback message from the last command
    pub feedback: String,
    pub feedback_kind: FeedbackKind,
    /// Tiles highlighted by the last hint
    pub hint_tiles: Vec<TileId>,
    /// Grouped words the board check rejected
    pub invalid_words: Vec<String>,
}

impl App {
    /// Deal the configured level for `category`
    pub fn new(config: &GameConfig, category: &str, level: u32) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let dealer = LevelDealer::new(BuiltinCategories, rng, config.round_seconds);
        let game = Game::new(dealer, category, level)?;
        let game = if config.sound_enabled {
            game.with_sounds(TerminalBell)
        } else {
            game.with_sounds(Silent)
        };

        Ok(Self {
            game,
            ticker: Ticker::default(),
            feedback: String::new(),
            feedback_kind: FeedbackKind::Info,
            hint_tiles: Vec::new(),
            invalid_words: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Start the countdown (safe to call repeatedly)
    pub fn start(&mut self, now: Instant) -> Result<()> {
        self.run(Command::StartGame)?;
        if self.state().is_playing() {
            self.ticker.start(now);
        }
        Ok(())
    }

    /// Advance the countdown
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        for outcome in self.ticker.drive(&mut self.game, now)? {
            if !outcome.message.is_empty() {
                self.show(&outcome);
            }
        }
        Ok(())
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Select the first free tile showing `c`
    pub fn on_char(&mut self, c: char) -> Result<()> {
        let letter = c.to_ascii_lowercase();
        let Some(id) = self
            .state()
            .unused_tiles()
            .find(|t| t.letter == letter)
            .map(|t| t.id)
        else {
            return Ok(());
        };
        self.run(Command::SelectTile(id))?;
        Ok(())
    }

    /// Drop the current selection
    pub fn on_backspace(&mut self) -> Result<()> {
        self.run(Command::ResetSelection)?;
        Ok(())
    }

    /// Submit the selection as a discovered word
    pub fn on_submit(&mut self) -> Result<()> {
        let outcome = self.run(Command::SubmitWord)?;
        if !outcome.success {
            // Give the letters back so the player can try again
            self.game.dispatch(Command::ResetSelection)?;
        }
        Ok(())
    }

    /// Group the selection without checking it
    pub fn on_group(&mut self) -> Result<()> {
        let outcome = self.run(Command::GroupWord)?;
        self.invalid_words = outcome.invalid_words;
        Ok(())
    }

    /// Return the n-th grouped word (0-based) to the pool
    pub fn on_ungroup(&mut self, index: usize) -> Result<()> {
        let Some(word) = self.state().grouped_words().get(index).map(|g| g.word.clone()) else {
            return Ok(());
        };
        self.run(Command::UngroupWord(word.clone()))?;
        if let Some(pos) = self.invalid_words.iter().position(|w| *w == word) {
            self.invalid_words.remove(pos);
        }
        Ok(())
    }

    /// Ask for a hint and highlight its tiles
    pub fn on_hint(&mut self) -> Result<()> {
        let outcome = self.run(Command::RequestHint)?;
        self.hint_tiles = outcome.hint.map(|h| h.tile_ids).unwrap_or_default();
        Ok(())
    }

    /// Deal the next level after a win
    pub fn next_level(&mut self) -> Result<bool> {
        let outcome = self.run(Command::AdvanceLevel)?;
        if outcome.success {
            self.clear_marks();
        }
        Ok(outcome.success)
    }

    /// Deal the current level again
    pub fn restart(&mut self) -> Result<()> {
        self.run(Command::Restart)?;
        self.clear_marks();
        Ok(())
    }

    pub fn is_round_over(&self) -> bool {
        self.state().is_finished()
    }

    pub fn round_summary(&self) -> RoundSummary {
        RoundSummary::from_state(self.state())
    }

    fn clear_marks(&mut self) {
        self.ticker.stop();
        self.hint_tiles.clear();
        self.invalid_words.clear();
    }

    fn run(&mut self, command: Command) -> Result<Outcome> {
        let outcome = self.game.dispatch(command)?;
        if !outcome.success || !outcome.message.is_empty() {
            self.show(&outcome);
        }
        if !outcome.effects.is_empty() && outcome.hint.is_none() {
            self.hint_tiles.clear();
        }
        Ok(outcome)
    }

    fn show(&mut self, outcome: &Outcome) {
        if outcome.message.is_empty() {
            return;
        }
        self.feedback = outcome.message.clone();
        let has = |effect: SoundEffect| outcome.effects.contains(&effect);
        self.feedback_kind = if !outcome.success || has(SoundEffect::Error) {
            FeedbackKind::Error
        } else if has(SoundEffect::WordComplete) || has(SoundEffect::GameComplete) || has(SoundEffect::Hint) {
            FeedbackKind::Success
        } else {
            FeedbackKind::Info
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Finish, Status};
    use std::time::Duration;

    fn config(seconds: u32) -> GameConfig {
        GameConfig {
            round_seconds: seconds,
            seed: Some(21),
            sound_enabled: false,
            ..GameConfig::default()
        }
    }

    fn started(seconds: u32) -> (App, Instant) {
        let now = Instant::now();
        let mut app = App::new(&config(seconds), "animals", 1).unwrap();
        app.start(now).unwrap();
        (app, now)
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.on_char(c).unwrap();
        }
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        assert!(App::new(&config(60), "planets", 1).is_err());
    }

    #[test]
    fn test_start_begins_countdown() {
        let (app, _) = started(60);
        assert_eq!(app.state().status(), Status::Playing);
        assert!(app.ticker().is_running());
    }

    #[test]
    fn test_timer_countdown() {
        let (mut app, t0) = started(5);
        app.tick(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(app.state().time_remaining(), 4);
        assert!(!app.is_round_over());

        app.tick(t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(app.state().time_remaining(), 0);
        assert!(app.is_round_over());
        assert_eq!(app.feedback, "TIME'S UP!");

        let summary = app.round_summary();
        assert_eq!(summary.time_left, 0);
        assert_eq!(summary.round_seconds, 5);
    }

    #[test]
    fn test_redundant_start_keeps_single_timer() {
        let (mut app, t0) = started(10);
        app.start(t0 + Duration::from_millis(500)).unwrap();
        app.tick(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(app.state().time_remaining(), 9);
    }

    #[test]
    fn test_typing_selects_tiles() {
        let (mut app, _) = started(60);
        let word = app.state().target_words()[0].clone();
        type_word(&mut app, &word);
        assert_eq!(app.state().selection_word(), word);
    }

    #[test]
    fn test_typing_missing_letter_is_ignored() {
        let (mut app, _) = started(60);
        let before = app.state().clone();
        let absent = ('a'..='z')
            .find(|c| !before.available_tiles().iter().any(|t| t.letter == *c))
            .unwrap();
        app.on_char(absent).unwrap();
        assert_eq!(*app.state(), before);
    }

    #[test]
    fn test_submit_target_word() {
        let (mut app, _) = started(60);
        let word = app.state().target_words()[0].clone();
        type_word(&mut app, &word);
        app.on_submit().unwrap();

        assert_eq!(app.state().discovered_words(), &[word]);
        assert_eq!(app.feedback, "Word found!");
        assert_eq!(app.feedback_kind, FeedbackKind::Success);
    }

    #[test]
    fn test_failed_submit_releases_selection() {
        let (mut app, _) = started(60);
        let first = app.state().unused_tiles().next().unwrap().letter;
        app.on_char(first).unwrap();
        app.on_submit().unwrap();

        assert_eq!(app.feedback_kind, FeedbackKind::Error);
        assert!(app.state().current_selection().is_empty());
        assert_eq!(app.state().unused_tiles().count(), app.state().available_tiles().len());
    }

    #[test]
    fn test_hint_highlights_tiles() {
        let (mut app, _) = started(60);
        app.on_hint().unwrap();
        assert!(!app.hint_tiles.is_empty());
        assert!(app.feedback.starts_with("Hint:"));

        let target = app.state().target_words()[0].clone();
        assert_eq!(app.hint_tiles.len(), target.len());
    }

    #[test]
    fn test_group_and_ungroup() {
        let (mut app, _) = started(60);
        let word = app.state().target_words()[0].clone();
        type_word(&mut app, &word);
        app.on_group().unwrap();
        assert_eq!(app.state().grouped_words().len(), 1);

        app.on_ungroup(0).unwrap();
        assert!(app.state().grouped_words().is_empty());
        assert_eq!(app.feedback, format!("Returned \"{}\" to blocks", word));

        // Out of range is ignored
        app.on_ungroup(3).unwrap();
    }

    #[test]
    fn test_solve_board_and_advance() {
        let (mut app, t0) = started(60);
        for word in app.state().target_words().to_vec() {
            type_word(&mut app, &word);
            app.on_group().unwrap();
        }
        assert_eq!(app.state().status(), Status::Finished(Finish::Won));

        let summary = app.round_summary();
        assert!(summary.level_complete);
        assert_eq!(summary.score, 300);
        assert_eq!(summary.completion_percent(), 100);

        assert!(app.next_level().unwrap());
        assert_eq!(app.state().level(), 2);
        assert!(!app.ticker().is_running());

        app.start(t0).unwrap();
        assert!(app.state().is_playing());
    }

    #[test]
    fn test_next_level_refused_before_win() {
        let (mut app, _) = started(60);
        assert!(!app.next_level().unwrap());
        assert_eq!(app.state().level(), 1);
    }

    #[test]
    fn test_restart_after_timeout() {
        let (mut app, t0) = started(1);
        app.tick(t0 + Duration::from_secs(1)).unwrap();
        assert!(app.is_round_over());

        app.restart().unwrap();
        assert_eq!(app.state().status(), Status::Waiting);
        assert_eq!(app.state().level(), 1);
        assert_eq!(app.state().time_remaining(), 1);
    }

    #[test]
    fn test_summary_partial_completion() {
        let mut rng = StdRng::seed_from_u64(1);
        let targets = vec!["cat".to_string(), "dog".to_string(), "bird".to_string()];
        let state = GameState::with_targets("animals", 1, targets, 60, &mut rng).unwrap();
        let summary = RoundSummary::from_state(&state);
        assert_eq!(summary.words_found, 0);
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.time_left, 60);
        assert_eq!(summary.round_seconds, 60);
        assert_eq!(summary.completion_percent(), 0);
        assert!(!summary.level_complete);

        let two_of_three = RoundSummary {
            words_found: 2,
            total_words: 3,
            ..summary
        };
        assert_eq!(two_of_three.completion_percent(), 67);
    }
}

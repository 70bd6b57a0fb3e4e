//! Level countdown driver
//!
//! A cooperative one-second scheduler. The event loop hands it the current
//! `Instant`; it turns elapsed periods into `Tick` commands for as long as
//! the level is playing, then stops itself.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::game::engine::Dealer;
use crate::game::{Command, Game, Outcome};

/// Countdown cadence
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Begin scheduling. Returns false if already running (no second timer).
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            tracing::debug!("ticker already running");
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the event loop may block before the next tick is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.checked_duration_since(now).unwrap_or(Duration::ZERO))
    }

    /// Number of whole periods elapsed since the last call, advancing the schedule
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        ticks
    }

    /// Feed due ticks into the game, stopping once it leaves `Playing`.
    pub fn drive<D: Dealer>(&mut self, game: &mut Game<D>, now: Instant) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        if !game.state().is_playing() {
            self.stop();
            return Ok(outcomes);
        }
        for _ in 0..self.due_ticks(now) {
            let outcome = game.dispatch(Command::Tick)?;
            outcomes.push(outcome);
            if !game.state().is_playing() {
                self.stop();
                break;
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::LevelDealer;
    use crate::game::{BuiltinCategories, Status};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(seconds: u32) -> Game {
        let dealer = LevelDealer::new(BuiltinCategories, StdRng::seed_from_u64(8), seconds);
        let mut game = Game::new(dealer, "colors", 1).unwrap();
        game.dispatch(Command::StartGame).unwrap();
        game
    }

    #[test]
    fn test_no_ticks_before_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.start(t0);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_millis(999)), 0);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_catches_up_missed_periods() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.start(t0);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_millis(3500)), 3);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_millis(3900)), 0);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_secs(4)), 1);
    }

    #[test]
    fn test_double_start_does_not_reschedule() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        assert!(ticker.start(t0));
        assert!(!ticker.start(t0 + Duration::from_millis(900)));
        assert_eq!(ticker.due_ticks(t0 + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_stopped_ticker_is_idle() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        assert_eq!(ticker.due_ticks(t0 + Duration::from_secs(10)), 0);
        assert_eq!(ticker.time_until_due(t0), None);
    }

    #[test]
    fn test_drive_counts_down() {
        let t0 = Instant::now();
        let mut game = game(10);
        let mut ticker = Ticker::default();
        ticker.start(t0);

        let outcomes = ticker.drive(&mut game, t0 + Duration::from_secs(3)).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(game.state().time_remaining(), 7);
        assert!(ticker.is_running());
    }

    #[test]
    fn test_drive_stops_at_timeout() {
        let t0 = Instant::now();
        let mut game = game(2);
        let mut ticker = Ticker::default();
        ticker.start(t0);

        let outcomes = ticker.drive(&mut game, t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[1].is_game_finished);
        assert!(matches!(game.state().status(), Status::Finished(_)));
        assert!(!ticker.is_running());

        let outcomes = ticker.drive(&mut game, t0 + Duration::from_secs(9)).unwrap();
        assert!(outcomes.is_empty());
        assert_eq!(game.state().time_remaining(), 0);
    }

    #[test]
    fn test_drive_stops_when_not_playing() {
        let t0 = Instant::now();
        let dealer = LevelDealer::new(BuiltinCategories, StdRng::seed_from_u64(8), 10);
        let mut game: Game = Game::new(dealer, "colors", 1).unwrap();
        let mut ticker = Ticker::default();
        ticker.start(t0);

        let outcomes = ticker.drive(&mut game, t0 + Duration::from_secs(2)).unwrap();
        assert!(outcomes.is_empty());
        assert!(!ticker.is_running());
        assert_eq!(game.state().time_remaining(), 10);
    }
}

//! Fixed timestep accumulator
//!
//! Converts variable frame deltas into a whole number of ticks. The clock
//! holds no callbacks; the host feeds it frame timestamps from whatever
//! scheduler it has (animation frames in the browser, a timer on native).

use super::state::{GamePhase, GameState};
use super::tick::{TickStatus, tick};

/// Per-frame accumulator state
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Unconsumed time (ms)
    pub accumulator: f64,
    /// Timestamp of the previous frame (ms)
    last_frame: Option<f64>,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Ticks run this frame
    pub ticks: u32,
    /// True if a tick ended the game
    pub game_over: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame timestamp and run the ticks it pays for.
    ///
    /// The interval is re-read before every tick so a slow effect picked up
    /// mid-frame applies to the next tick. Stops as soon as the game leaves
    /// `Playing`.
    pub fn advance(&mut self, state: &mut GameState, now: f64) -> FrameReport {
        let mut report = FrameReport::default();

        let dt = match self.last_frame {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_frame = Some(now);

        if state.phase != GamePhase::Playing {
            return report;
        }

        self.accumulator += dt;
        loop {
            let interval = state.effective_interval(now);
            if self.accumulator < interval {
                break;
            }
            let status = tick(state, now);
            if status == TickStatus::Skipped {
                break;
            }
            report.ticks += 1;
            self.accumulator -= interval;
            if let TickStatus::GameOver(_) = status {
                report.game_over = true;
                break;
            }
        }

        report
    }

    /// Start timing from `now` again without touching the accumulator.
    ///
    /// Used on resume so the paused span is not counted; any fractional
    /// tick left in the accumulator carries over.
    pub fn resume(&mut self, now: f64) {
        self.last_frame = Some(now);
    }

    /// Forget everything (new game)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{INITIAL_SPEED, SLOW_FACTOR};
    use crate::settings::{Settings, WallMode};
    use crate::sim::board::{Cell, Direction};
    use crate::sim::effects::ItemKind;

    fn open_board_state() -> GameState {
        let settings = Settings {
            wall_mode: WallMode::Wrap,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 1, 0);
        state.snake = [Cell::new(5, 1), Cell::new(4, 1), Cell::new(3, 1)]
            .into_iter()
            .collect();
        state.direction = Direction::Right;
        state.food = Some(Cell::new(0, 14));
        state
    }

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        assert_eq!(clock.advance(&mut state, 10_000.0).ticks, 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        clock.advance(&mut state, 0.0);

        assert_eq!(clock.advance(&mut state, 100.0).ticks, 0);
        assert_eq!(clock.advance(&mut state, 150.0).ticks, 1);
        assert!((clock.accumulator - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_catches_up_after_dropped_frames() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        clock.advance(&mut state, 0.0);

        let report = clock.advance(&mut state, INITIAL_SPEED * 3.0 + 20.0);
        assert_eq!(report.ticks, 3);
        assert!((clock.accumulator - 20.0).abs() < 1e-9);
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_slow_effect_stretches_ticks() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        state.effects.activate(ItemKind::Slow, 0.0);
        clock.advance(&mut state, 0.0);

        assert_eq!(clock.advance(&mut state, INITIAL_SPEED).ticks, 0);
        assert_eq!(clock.advance(&mut state, INITIAL_SPEED * SLOW_FACTOR).ticks, 1);
    }

    #[test]
    fn test_stops_on_game_over() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        state.obstacles.insert(Cell::new(6, 1));
        clock.advance(&mut state, 0.0);

        let report = clock.advance(&mut state, INITIAL_SPEED * 5.0);
        assert_eq!(report.ticks, 1);
        assert!(report.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_pause_preserves_accumulator() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        clock.advance(&mut state, 0.0);
        clock.advance(&mut state, 100.0);
        assert!((clock.accumulator - 100.0).abs() < 1e-9);

        state.phase = GamePhase::Paused;
        assert_eq!(clock.advance(&mut state, 5_000.0).ticks, 0);
        assert!((clock.accumulator - 100.0).abs() < 1e-9);

        // Resume carries the 100ms of debt; the paused span is not counted
        state.phase = GamePhase::Playing;
        clock.resume(60_000.0);
        assert_eq!(clock.advance(&mut state, 60_050.0).ticks, 1);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_reset_clears_accumulator() {
        let mut clock = FrameClock::new();
        let mut state = open_board_state();
        clock.advance(&mut state, 0.0);
        clock.advance(&mut state, 120.0);
        clock.reset();
        assert_eq!(clock.accumulator, 0.0);
        assert_eq!(clock.advance(&mut state, 10_000.0).ticks, 0);
    }
}

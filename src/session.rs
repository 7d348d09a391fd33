//! Game session: one running game plus everything that outlives it
//!
//! Owns the current `GameState`, the frame clock, the settings and the best
//! score, and routes player input to them. Hosts call `frame` once per
//! display refresh and render afterwards.

use rand::Rng;

use crate::best_score::BestScore;
use crate::hud::HudSnapshot;
use crate::persistence::KeyValueStore;
use crate::platform::InputSignal;
use crate::renderer::RenderScene;
use crate::settings::Settings;
use crate::sim::{Collision, Direction, FrameClock, FrameReport, GameEvent, GamePhase, GameState};

/// Shown when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u64,
    pub level: u32,
    pub collision: Option<Collision>,
    /// Score beat the best from before this game (and is above zero)
    pub new_best: bool,
}

pub struct Session<S: KeyValueStore> {
    store: S,
    settings: Settings,
    best: BestScore,
    state: GameState,
    clock: FrameClock,
    summary: Option<GameOverSummary>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and best score from `store` and start a game
    pub fn new(store: S, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let state = GameState::new(settings, seed, best.value());
        log::info!(
            "New game: {} board, {} walls, {} curve (seed {})",
            settings.board_size.as_str(),
            settings.wall_mode.as_str(),
            settings.difficulty_curve.as_str(),
            state.seed
        );

        Self {
            store,
            settings,
            best,
            state,
            clock: FrameClock::new(),
            summary: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Set once the current game has ended
    pub fn game_over(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Run the ticks owed for this frame
    pub fn frame(&mut self, now: f64) -> FrameReport {
        let report = self.clock.advance(&mut self.state, now);
        if report.game_over {
            self.finish();
        }
        report
    }

    /// Route one input signal
    pub fn handle_input(&mut self, signal: InputSignal, now: f64) {
        match signal {
            InputSignal::Steer(dir) => {
                self.steer(dir);
            }
            InputSignal::Pause => self.toggle_pause(now),
            InputSignal::Restart => {
                let seed = self.state.rng.random::<u64>();
                self.restart(seed);
            }
        }
    }

    /// Queue a turn. Returns false if it was rejected.
    pub fn steer(&mut self, dir: Direction) -> bool {
        self.state.queue_direction(dir)
    }

    /// Playing <-> Paused. No effect once the game is over.
    pub fn toggle_pause(&mut self, now: f64) {
        match self.state.phase {
            GamePhase::Playing => {
                self.state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Playing;
                self.clock.resume(now);
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    /// Pause if currently playing (tab hidden, window blur)
    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
        }
    }

    /// Throw away the current game and start a new one
    pub fn restart(&mut self, seed: u64) {
        if self.summary.is_none() {
            self.record_best();
        }
        self.state = GameState::new(self.settings, seed, self.best.value());
        self.clock.reset();
        self.summary = None;
        log::info!("Game restarted with seed: {}", self.state.seed);
    }

    /// Persist new settings and start a new game with them
    pub fn apply_settings(&mut self, settings: Settings, seed: u64) {
        self.settings = settings;
        if let Err(e) = settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", e);
        }
        self.restart(seed);
    }

    pub fn hud(&self, now: f64) -> HudSnapshot {
        let mut hud = HudSnapshot::capture(&self.state, now);
        hud.best = hud.best.max(self.best.value());
        hud
    }

    pub fn scene(&self, now: f64) -> RenderScene {
        RenderScene::build(&self.state, now)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn finish(&mut self) {
        let collision = self.state.events.iter().rev().find_map(|event| match event {
            GameEvent::GameOver { collision, .. } => Some(*collision),
            _ => None,
        });
        let summary = GameOverSummary {
            score: self.state.score,
            level: self.state.level,
            collision,
            new_best: self.state.is_new_best(),
        };
        self.record_best();
        self.summary = Some(summary);
        if summary.new_best {
            log::info!("New best score: {}", summary.score);
        }
    }

    fn record_best(&mut self) {
        if self.best.record(self.state.score) {
            if let Err(e) = self.best.save(&mut self.store) {
                log::warn!("Could not save best score: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::settings::{BoardSize, WallMode};
    use crate::sim::Cell;

    /// Session whose snake runs right along row 1 towards an obstacle
    fn doomed_session(store: MemoryStore) -> Session<MemoryStore> {
        let mut session = Session::new(store, 21);
        let state = &mut session.state;
        state.snake = [Cell::new(3, 1), Cell::new(2, 1), Cell::new(1, 1)]
            .into_iter()
            .collect();
        state.food = Some(Cell::new(4, 1));
        state.obstacles.insert(Cell::new(6, 1));
        session
    }

    /// Eat the food at (4, 1), then crash two ticks later
    fn run_into_obstacle(session: &mut Session<MemoryStore>) {
        session.frame(0.0);
        session.frame(150.0);
        // Keep respawned food and items off the path
        session.state.food = Some(Cell::new(0, 14));
        session.state.items.clear();
        session.frame(300.0);
        session.frame(450.0);
    }

    #[test]
    fn test_game_over_records_best() {
        let mut session = doomed_session(MemoryStore::new());
        run_into_obstacle(&mut session);

        let summary = *session.game_over().unwrap();
        assert_eq!(summary.score, 11);
        assert!(summary.new_best);
        assert_eq!(summary.collision, Some(Collision::Obstacle));
        assert_eq!(session.best_score(), 11);
        assert_eq!(BestScore::load(session.store()).value(), 11);
    }

    #[test]
    fn test_new_best_requires_beating_previous() {
        let mut store = MemoryStore::new();
        BestScore::new(11).save(&mut store).unwrap();

        let mut session = doomed_session(store);
        run_into_obstacle(&mut session);
        let summary = session.game_over().unwrap();
        assert_eq!(summary.score, 11);
        assert!(!summary.new_best);
    }

    #[test]
    fn test_zero_score_is_never_new_best() {
        let mut session = Session::new(MemoryStore::new(), 4);
        session.state.obstacles.insert(Cell::new(11, 7));
        session.frame(0.0);
        session.frame(150.0);
        let summary = session.game_over().unwrap();
        assert_eq!(summary.score, 0);
        assert!(!summary.new_best);
    }

    #[test]
    fn test_pause_blocks_ticks_and_input() {
        let mut session = Session::new(MemoryStore::new(), 9);
        session.frame(0.0);
        session.handle_input(InputSignal::Pause, 10.0);
        assert_eq!(session.state().phase, GamePhase::Paused);
        assert!(!session.steer(Direction::Up));

        assert_eq!(session.frame(5_000.0).ticks, 0);

        session.handle_input(InputSignal::Pause, 9_000.0);
        assert_eq!(session.state().phase, GamePhase::Playing);
        // Paused span does not count
        assert_eq!(session.frame(9_100.0).ticks, 0);
        assert_eq!(session.frame(9_150.0).ticks, 1);
    }

    #[test]
    fn test_restart_resets_game_keeps_best() {
        let mut session = doomed_session(MemoryStore::new());
        run_into_obstacle(&mut session);
        assert!(session.game_over().is_some());

        session.handle_input(InputSignal::Restart, 1_000.0);
        assert!(session.game_over().is_none());
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().snake.len(), 3);
        assert!(session.state().obstacles.is_empty());
        assert_eq!(session.best_score(), 11);
        assert_eq!(session.hud(1_000.0).best, 11);
    }

    #[test]
    fn test_apply_settings_persists_and_restarts() {
        let mut session = Session::new(MemoryStore::new(), 1);
        let settings = Settings {
            board_size: BoardSize::Small,
            wall_mode: WallMode::Wrap,
            ..Settings::default()
        };
        session.apply_settings(settings, 2);

        assert_eq!(session.state().board.cols, 15);
        assert_eq!(session.state().settings, settings);
        assert_eq!(session.state().seed, 2);
        assert_eq!(Settings::load(session.store()), settings);
    }
}

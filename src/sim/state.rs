//! Game state and core simulation types
//!
//! One `GameState` per game. It is created at reset and replaced by the next
//! reset; only the best score and the settings outlive it.

use std::collections::{HashSet, VecDeque};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Direction};
use super::collision::Collision;
use super::effects::{Combo, Effects, ItemKind};
use super::placement::find_empty_position;
use super::progression;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Cell,
    pub spawned_at: f64,
}

impl Item {
    /// Milliseconds until the item disappears (negative once expired)
    pub fn time_left(&self, now: f64) -> f64 {
        self.spawned_at + ITEM_LIFETIME - now
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawned_at > ITEM_LIFETIME
    }
}

/// An obstacle still in its warning period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingObstacle {
    pub pos: Cell,
    pub activate_at: f64,
}

impl PendingObstacle {
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.activate_at
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { points: u64, streak: u32 },
    ItemSpawned { kind: ItemKind, pos: Cell },
    ItemCollected { kind: ItemKind },
    ItemExpired { kind: ItemKind },
    LevelUp { level: u32 },
    ObstacleSpawned { pos: Cell },
    ObstacleActivated { pos: Cell },
    ComboLost { streak: u32 },
    GameOver { collision: Collision, score: u64 },
}

/// Complete game state (deterministic for a given seed and time sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Placement/spawn RNG
    pub rng: Pcg32,
    /// Settings this game was started with
    pub settings: Settings,
    pub board: Board,
    pub phase: GamePhase,
    /// Segments, head first
    pub snake: VecDeque<Cell>,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Directions waiting for upcoming ticks
    pub direction_queue: VecDeque<Direction>,
    pub food: Option<Cell>,
    pub items: Vec<Item>,
    pub pending_obstacles: Vec<PendingObstacle>,
    pub obstacles: HashSet<Cell>,
    pub effects: Effects,
    pub combo: Combo,
    pub score: u64,
    /// Best score including this game so far
    pub best_score: u64,
    /// Best score when this game began (for the "new best" flag)
    pub previous_best: u64,
    pub foods_eaten: u32,
    pub level: u32,
    /// Base tick interval (ms) for the current level
    pub tick_interval: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the snake centred and facing right
    pub fn new(settings: Settings, seed: u64, best_score: u64) -> Self {
        let board = Board::from_settings(&settings);
        let head = board.center();
        let snake = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            board,
            phase: GamePhase::Playing,
            snake,
            direction: Direction::Right,
            direction_queue: VecDeque::with_capacity(DIRECTION_QUEUE_CAPACITY),
            food: None,
            items: Vec::new(),
            pending_obstacles: Vec::new(),
            obstacles: HashSet::new(),
            effects: Effects::default(),
            combo: Combo::default(),
            score: 0,
            best_score,
            previous_best: best_score,
            foods_eaten: 0,
            level: 1,
            tick_interval: progression::tick_interval(1, settings.difficulty_curve),
            time_ticks: 0,
            events: Vec::new(),
        };

        state.food = state.find_free_cell(&[]);
        state
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Queue a turn for an upcoming tick.
    ///
    /// Rejected unless playing, when equal or opposite to the last queued
    /// (or current) direction, or when the queue is full.
    pub fn queue_direction(&mut self, dir: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if self.direction_queue.len() >= DIRECTION_QUEUE_CAPACITY {
            return false;
        }
        let last = self
            .direction_queue
            .back()
            .copied()
            .unwrap_or(self.direction);
        if last.is_same_axis(dir) {
            return false;
        }
        self.direction_queue.push_back(dir);
        true
    }

    /// Union of everything standing on the board. Rebuilt on every call.
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        let mut occupied: HashSet<Cell> = self.snake.iter().copied().collect();
        occupied.extend(self.food);
        occupied.extend(self.items.iter().map(|item| item.pos));
        occupied.extend(self.obstacles.iter().copied());
        occupied.extend(self.pending_obstacles.iter().map(|o| o.pos));
        occupied
    }

    /// Free cell avoiding the current occupancy plus `extra`
    pub fn find_free_cell(&mut self, extra: &[Cell]) -> Option<Cell> {
        let mut occupied = self.occupied_cells();
        occupied.extend(extra.iter().copied());
        find_empty_position(&mut self.rng, &self.board, &occupied)
    }

    pub fn is_effect_active(&self, kind: ItemKind, now: f64) -> bool {
        self.effects.is_active(kind, now)
    }

    /// Tick interval the loop should use right now
    pub fn effective_interval(&self, now: f64) -> f64 {
        progression::effective_interval(
            self.tick_interval,
            self.effects.is_active(ItemKind::Slow, now),
        )
    }

    /// True once the game is over with a score above the previous best
    pub fn is_new_best(&self) -> bool {
        self.score > 0 && self.score > self.previous_best
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(Settings::default(), 42, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.head(), Cell::new(10, 7));
        assert_eq!(state.snake[2], Cell::new(8, 7));
        assert_eq!(state.level, 1);
        assert_eq!(state.tick_interval, INITIAL_SPEED);

        let food = state.food.unwrap();
        assert!(state.board.contains(food));
        assert!(!state.snake.contains(&food));
    }

    #[test]
    fn test_queue_rejects_reversal_and_repeat() {
        let mut state = GameState::new(Settings::default(), 1, 0);
        assert!(!state.queue_direction(Direction::Left));
        assert!(!state.queue_direction(Direction::Right));
        assert!(state.queue_direction(Direction::Up));
        // Compared against the last queued direction, not the current one
        assert!(!state.queue_direction(Direction::Down));
        assert!(state.queue_direction(Direction::Left));
        // Full
        assert!(!state.queue_direction(Direction::Down));
        assert_eq!(state.direction_queue.len(), 2);
    }

    #[test]
    fn test_queue_ignored_unless_playing() {
        let mut state = GameState::new(Settings::default(), 1, 0);
        state.phase = GamePhase::Paused;
        assert!(!state.queue_direction(Direction::Up));
        state.phase = GamePhase::GameOver;
        assert!(!state.queue_direction(Direction::Up));
        assert!(state.direction_queue.is_empty());
    }

    #[test]
    fn test_occupied_cells_union() {
        let mut state = GameState::new(Settings::default(), 5, 0);
        state.food = Some(Cell::new(0, 0));
        state.items.push(Item {
            kind: ItemKind::Ghost,
            pos: Cell::new(1, 0),
            spawned_at: 0.0,
        });
        state.obstacles.insert(Cell::new(2, 0));
        state.pending_obstacles.push(PendingObstacle {
            pos: Cell::new(3, 0),
            activate_at: 1500.0,
        });

        let occupied = state.occupied_cells();
        assert_eq!(occupied.len(), 3 + 4);
        for x in 0..4 {
            assert!(occupied.contains(&Cell::new(x, 0)));
        }
    }

    #[test]
    fn test_item_expiry() {
        let item = Item {
            kind: ItemKind::Slow,
            pos: Cell::ZERO,
            spawned_at: 1000.0,
        };
        assert!(!item.is_expired(6000.0));
        assert!(item.is_expired(6000.5));
        assert_eq!(item.time_left(5500.0), 500.0);
    }
}

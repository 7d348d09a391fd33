//! Grid Snake - A grid snake game with power-ups and obstacle hazards
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, tick loop)
//! - `session`: One running game plus its clock, settings and best score
//! - `renderer`: Render scene snapshot and the browser canvas painter
//! - `platform`: Browser/native platform abstraction (input mapping)
//! - `persistence`: Key-value storage for settings and best score
//! - `hud`: HUD read model

pub mod best_score;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use session::{GameOverSummary, Session};
pub use settings::{BoardSize, DifficultyCurve, Settings, WallMode};

/// Game configuration constants
pub mod consts {
    /// Tick interval at level 1 (ms)
    pub const INITIAL_SPEED: f64 = 150.0;
    /// Fastest allowed tick interval (ms)
    pub const MIN_SPEED: f64 = 50.0;
    /// Tick interval multiplier while the slow effect is active
    pub const SLOW_FACTOR: f64 = 1.5;

    /// Foods needed per level
    pub const FOODS_PER_LEVEL: u32 = 5;
    /// Base points per food (level is added on top)
    pub const FOOD_BASE_POINTS: u64 = 10;
    /// Extra points per combo streak step
    pub const COMBO_POINTS_PER_STREAK: u64 = 2;
    /// Score multiplier while the multiplier effect is active
    pub const MULTIPLIER_FACTOR: u64 = 2;
    /// Flat bonus for picking up an item
    pub const ITEM_PICKUP_BONUS: u64 = 5;

    /// Time after eating food during which the streak survives (ms)
    pub const COMBO_WINDOW: f64 = 2500.0;
    /// Power-up effect duration (ms)
    pub const EFFECT_DURATION: f64 = 5000.0;
    /// Lifetime of an uncollected item (ms)
    pub const ITEM_LIFETIME: f64 = 5000.0;
    /// Chance of an item spawning when food is eaten
    pub const ITEM_SPAWN_CHANCE: f64 = 0.15;

    /// Level from which each level-up spawns an obstacle
    pub const OBSTACLE_LEVEL_THRESHOLD: u32 = 3;
    /// Warning period before a spawned obstacle blocks movement (ms)
    pub const OBSTACLE_WARNING: f64 = 1500.0;

    /// Random draws before falling back to a full board scan
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
    /// Initial snake length
    pub const INITIAL_SNAKE_LENGTH: i32 = 3;
    /// Pending direction queue capacity
    pub const DIRECTION_QUEUE_CAPACITY: usize = 2;

    /// Items start blinking this long before they expire (ms)
    pub const BLINK_WINDOW: f64 = 1000.0;
    /// Blink half-period (ms)
    pub const BLINK_HALF_PERIOD: f64 = 200.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the caller, sampled once per tick
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod board;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod placement;
pub mod progression;
pub mod state;
pub mod tick;

pub use board::{Board, Cell, Direction};
pub use clock::{FrameClock, FrameReport};
pub use collision::{Collision, check_collision};
pub use effects::{Combo, Effects, ItemKind};
pub use placement::find_empty_position;
pub use state::{GameEvent, GamePhase, GameState, Item, PendingObstacle};
pub use tick::{TickStatus, tick};

//! Render scene snapshot
//!
//! Built once per frame after all ticks have run. Painters only read it.

use crate::consts::{BLINK_HALF_PERIOD, BLINK_WINDOW};
use crate::sim::{Cell, GameState, Item, ItemKind};

/// Snake body opacity while ghost is active
pub const GHOST_BODY_ALPHA: f32 = 0.35;
/// Opacity of an obstacle still in its warning period
pub const WARNING_ALPHA: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    SnakeHead,
    SnakeBody,
    Food,
    Item(ItemKind),
    Obstacle,
    ObstacleWarning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub cell: Cell,
    pub kind: SpriteKind,
    pub alpha: f32,
}

/// Everything to draw this frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub cols: i32,
    pub rows: i32,
    pub sprites: Vec<Sprite>,
}

impl RenderScene {
    pub fn build(state: &GameState, now: f64) -> Self {
        let mut sprites = Vec::with_capacity(state.snake.len() + state.items.len() + 8);

        for pending in &state.pending_obstacles {
            sprites.push(Sprite {
                cell: pending.pos,
                kind: SpriteKind::ObstacleWarning,
                alpha: WARNING_ALPHA,
            });
        }
        for cell in &state.obstacles {
            sprites.push(Sprite {
                cell: *cell,
                kind: SpriteKind::Obstacle,
                alpha: 1.0,
            });
        }

        if let Some(food) = state.food {
            sprites.push(Sprite {
                cell: food,
                kind: SpriteKind::Food,
                alpha: 1.0,
            });
        }

        for item in state.items.iter().filter(|item| item_visible(item, now)) {
            sprites.push(Sprite {
                cell: item.pos,
                kind: SpriteKind::Item(item.kind),
                alpha: 1.0,
            });
        }

        let body_alpha = if state.is_effect_active(ItemKind::Ghost, now) {
            GHOST_BODY_ALPHA
        } else {
            1.0
        };
        // Tail first so the head ends up on top
        for (i, cell) in state.snake.iter().enumerate().rev() {
            let (kind, alpha) = if i == 0 {
                (SpriteKind::SnakeHead, 1.0)
            } else {
                (SpriteKind::SnakeBody, body_alpha)
            };
            sprites.push(Sprite {
                cell: *cell,
                kind,
                alpha,
            });
        }

        Self {
            cols: state.board.cols,
            rows: state.board.rows,
            sprites,
        }
    }

    /// Sprites of one kind
    pub fn of_kind(&self, kind: SpriteKind) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }
}

/// Items blink (alternating 200ms on/off) during their final second.
/// An item past its lifetime stays hidden until the next tick removes it.
pub fn item_visible(item: &Item, now: f64) -> bool {
    let left = item.time_left(now);
    if left <= 0.0 {
        return false;
    }
    if left > BLINK_WINDOW {
        return true;
    }
    let phase = ((BLINK_WINDOW - left) / BLINK_HALF_PERIOD).floor() as i64;
    phase % 2 == 0
}

//! Collision checks for the snake head
//!
//! Checked in a fixed order: walls, own body, obstacles. Ghost only skips
//! the body check.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};
use crate::settings::WallMode;

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Body,
    Obstacle,
}

impl Collision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::Body => "body",
            Collision::Obstacle => "obstacle",
        }
    }
}

/// Check a candidate head position.
///
/// `next` must already be wrapped when the board wraps. `snake[0]` is the
/// current head and is never counted as body.
pub fn check_collision(
    next: Cell,
    board: &Board,
    snake: &VecDeque<Cell>,
    obstacles: &HashSet<Cell>,
    ghost_active: bool,
) -> Option<Collision> {
    if board.wall_mode == WallMode::Solid && !board.contains(next) {
        return Some(Collision::Wall);
    }

    if !ghost_active && snake.iter().skip(1).any(|segment| *segment == next) {
        return Some(Collision::Body);
    }

    if obstacles.contains(&next) {
        return Some(Collision::Obstacle);
    }

    None
}

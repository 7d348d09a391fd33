//! Board geometry: grid bounds, wall policy and directions

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::settings::{Settings, WallMode};

/// A grid cell (x = column, y = row, origin top-left)
pub type Cell = IVec2;

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step on the grid (y grows downward)
    pub fn vector(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` is this direction or its reversal
    pub fn is_same_axis(&self, other: Direction) -> bool {
        *self == other || self.opposite() == other
    }
}

/// Fixed grid dimensions plus edge behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub cols: i32,
    pub rows: i32,
    pub wall_mode: WallMode,
}

impl Board {
    pub fn new(cols: i32, rows: i32, wall_mode: WallMode) -> Self {
        Self {
            cols,
            rows,
            wall_mode,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let (cols, rows) = settings.board_size.dimensions();
        Self::new(cols, rows, settings.wall_mode)
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Wrap a cell onto the board, each axis independently
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }

    /// Neighbouring cell in `dir`, wrapped when the board wraps
    pub fn step(&self, cell: Cell, dir: Direction) -> Cell {
        let next = cell + dir.vector();
        match self.wall_mode {
            WallMode::Wrap => self.wrap(next),
            WallMode::Solid => next,
        }
    }

    /// Centre cell (initial snake head)
    pub fn center(&self) -> Cell {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| IVec2::new(x, y)))
    }
}

//! Free-cell search for food, items and obstacles

use std::collections::HashSet;

use rand::Rng;

use super::board::{Board, Cell};
use crate::consts::PLACEMENT_ATTEMPTS;

/// Find an unoccupied cell.
///
/// Random draws first (fast on a sparse board), then a row-major scan so a
/// free cell is always found if one exists. `None` means the board is full.
pub fn find_empty_position<R: Rng>(
    rng: &mut R,
    board: &Board,
    occupied: &HashSet<Cell>,
) -> Option<Cell> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..board.cols), rng.random_range(0..board.rows));
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }

    board.cells().find(|cell| !occupied.contains(cell))
}

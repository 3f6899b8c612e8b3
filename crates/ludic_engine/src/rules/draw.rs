//! Board-full detection.
//!
//! A full board is only a draw if nobody has won; the reducer checks the
//! win condition first, so this module stays a pure occupancy predicate.

use crate::grid::Grid;

/// Returns true if every cell on the grid is occupied.
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().iter().all(|cell| cell.is_some())
}

//! Win detection over a configurable adjacency relation.

use crate::adjacency::{AdjacencyConfig, AdjacencyMode};
use crate::grid::{Grid, Player, Position};
use std::collections::HashSet;
use tracing::instrument;

/// Checks whether `player` has a connected run of at least `win_length`
/// cells under the given adjacency relation.
///
/// In [`AdjacencyMode::Linear`] each enabled direction is searched
/// independently, so only straight runs qualify. In
/// [`AdjacencyMode::Composite`] all enabled directions form a single
/// neighborhood and runs may bend. With no directions enabled the result
/// is always false.
#[instrument(skip(grid), level = "debug")]
pub fn check_winner(
    grid: &Grid,
    player: Player,
    win_length: usize,
    adjacency: &AdjacencyConfig,
) -> bool {
    let dirs = adjacency.enabled_directions();
    if dirs.is_empty() {
        return false;
    }
    let starts = player_cells(grid, player);
    match adjacency.mode {
        AdjacencyMode::Linear => {
            for dir in &dirs {
                for &start in &starts {
                    let mut visited = HashSet::new();
                    if expand_run(
                        grid,
                        player,
                        start,
                        std::slice::from_ref(dir),
                        win_length,
                        1,
                        &mut visited,
                    ) {
                        return true;
                    }
                }
            }
            false
        }
        AdjacencyMode::Composite => {
            for &start in &starts {
                let mut visited = HashSet::new();
                if expand_run(grid, player, start, &dirs, win_length, 1, &mut visited) {
                    return true;
                }
            }
            false
        }
    }
}

/// All positions owned by `player`, in row-major order.
fn player_cells(grid: &Grid, player: Player) -> Vec<Position> {
    let mut cells = Vec::new();
    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            let pos = Position::new(row, col);
            if grid.get(pos) == Some(player) {
                cells.push(pos);
            }
        }
    }
    cells
}

/// Depth-first expansion of a run rooted at `pos`.
///
/// The visited set is shared across the whole expansion from one start
/// cell: cells touched by a failed branch are not retried. This bounds
/// the search instead of enumerating every simple path.
fn expand_run(
    grid: &Grid,
    player: Player,
    pos: Position,
    dirs: &[Position],
    win_length: usize,
    current_length: usize,
    visited: &mut HashSet<Position>,
) -> bool {
    if current_length >= win_length {
        return true;
    }
    visited.insert(pos);
    for dir in dirs {
        let next = pos.step(*dir);
        if visited.contains(&next) {
            continue;
        }
        if grid.get(next) != Some(player) {
            continue;
        }
        if expand_run(grid, player, next, dirs, win_length, current_length + 1, visited) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid from row strings of `X`, `O`, and `.`.
    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Grid::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let value = match ch {
                    'X' => Some(Player::X),
                    'O' => Some(Player::O),
                    _ => None,
                };
                grid.set_cell(Position::new(row as i32, col as i32), value);
            }
        }
        grid
    }

    fn linear(horizontal: bool, vertical: bool, back: bool, forward: bool) -> AdjacencyConfig {
        AdjacencyConfig {
            mode: AdjacencyMode::Linear,
            horizontal,
            vertical,
            back_diagonal: back,
            forward_diagonal: forward,
        }
    }

    fn composite(horizontal: bool, vertical: bool) -> AdjacencyConfig {
        AdjacencyConfig {
            mode: AdjacencyMode::Composite,
            horizontal,
            vertical,
            back_diagonal: false,
            forward_diagonal: false,
        }
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let grid = Grid::new(3, 3);
        assert!(!check_winner(&grid, Player::X, 3, &linear(true, true, true, true)));
    }

    #[test]
    fn test_horizontal_run_wins() {
        let grid = grid_from_rows(&["XXX", "OO.", "..."]);
        assert!(check_winner(&grid, Player::X, 3, &linear(true, true, true, true)));
        assert!(!check_winner(&grid, Player::O, 3, &linear(true, true, true, true)));
    }

    #[test]
    fn test_disabled_direction_does_not_win() {
        let grid = grid_from_rows(&["X..", "X..", "X.."]);
        assert!(!check_winner(&grid, Player::X, 3, &linear(true, false, true, true)));
        assert!(check_winner(&grid, Player::X, 3, &linear(false, true, false, false)));
    }

    #[test]
    fn test_forward_diagonal_run_wins() {
        let grid = grid_from_rows(&["..X", ".X.", "X.."]);
        assert!(check_winner(&grid, Player::X, 3, &linear(false, false, false, true)));
        assert!(!check_winner(&grid, Player::X, 3, &linear(true, true, true, false)));
    }

    #[test]
    fn test_run_longer_than_needed_still_wins() {
        let grid = grid_from_rows(&["XXXX", "....", "....", "...."]);
        assert!(check_winner(&grid, Player::X, 3, &linear(true, false, false, false)));
    }

    #[test]
    fn test_linear_does_not_bend() {
        let grid = grid_from_rows(&["XX..", ".X..", ".X..", "...."]);
        assert!(!check_winner(&grid, Player::X, 4, &linear(true, true, false, false)));
    }

    #[test]
    fn test_composite_run_may_bend() {
        let grid = grid_from_rows(&["XX..", ".X..", ".X..", "...."]);
        assert!(check_winner(&grid, Player::X, 4, &composite(true, true)));
    }

    #[test]
    fn test_no_directions_never_wins() {
        let grid = grid_from_rows(&["XXX", "XXX", "XXX"]);
        assert!(!check_winner(&grid, Player::X, 3, &linear(false, false, false, false)));
    }

    #[test]
    fn test_short_run_does_not_win() {
        let grid = grid_from_rows(&["XX.", "...", "..."]);
        assert!(!check_winner(&grid, Player::X, 3, &linear(true, true, true, true)));
    }
}

//! Draw invariant: a drawn game has a full board.

use super::Invariant;
use crate::rules::is_full;
use crate::state::{GameState, GameStatus};

/// Invariant: `draw` status implies every cell is occupied.
///
/// The converse does not hold: a full board whose final move completed a
/// run is a win, because the reducer checks the win condition first.
pub struct DrawFullInvariant;

impl Invariant<GameState> for DrawFullInvariant {
    fn holds(state: &GameState) -> bool {
        state.status != GameStatus::Draw || is_full(&state.grid)
    }

    fn description() -> &'static str {
        "Draw status implies a full board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Player};

    #[test]
    fn test_playing_on_partial_board_holds() {
        let state = GameState {
            grid: Grid::new(2, 2),
            current_player: Player::X,
            status: GameStatus::Playing,
            winner: None,
            move_count: 0,
        };
        assert!(DrawFullInvariant::holds(&state));
    }

    #[test]
    fn test_draw_on_partial_board_violates() {
        let state = GameState {
            grid: Grid::new(2, 2),
            current_player: Player::X,
            status: GameStatus::Draw,
            winner: None,
            move_count: 3,
        };
        assert!(!DrawFullInvariant::holds(&state));
    }

    #[test]
    fn test_draw_on_full_board_holds() {
        let cells = vec![
            Some(Player::X),
            Some(Player::O),
            Some(Player::O),
            Some(Player::X),
        ];
        let state = GameState {
            grid: Grid::from_cells(2, 2, cells),
            current_player: Player::O,
            status: GameStatus::Draw,
            winner: None,
            move_count: 4,
        };
        assert!(DrawFullInvariant::holds(&state));
    }
}

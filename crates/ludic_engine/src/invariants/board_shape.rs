//! Board shape invariant: the cell vector always matches the dimensions.

use super::Invariant;
use crate::state::GameState;

/// Invariant: the grid holds exactly `width * height` cells.
///
/// Every grid constructor enforces this, so a violation means a state
/// was assembled outside the engine's transitions.
pub struct BoardShapeInvariant;

impl Invariant<GameState> for BoardShapeInvariant {
    fn holds(state: &GameState) -> bool {
        state.grid.cells().len() == state.grid.width() * state.grid.height()
    }

    fn description() -> &'static str {
        "Grid cell count equals width times height"
    }
}

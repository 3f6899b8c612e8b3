//! Winner consistency invariant: winner and status agree.

use super::Invariant;
use crate::state::{GameState, GameStatus};

/// Invariant: `winner` is present exactly when the status is `won`.
pub struct WinnerConsistentInvariant;

impl Invariant<GameState> for WinnerConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        match state.status {
            GameStatus::Won => state.winner.is_some(),
            GameStatus::Playing | GameStatus::Draw => state.winner.is_none(),
        }
    }

    fn description() -> &'static str {
        "Winner is present exactly when status is won"
    }
}

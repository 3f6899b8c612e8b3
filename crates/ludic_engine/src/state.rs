//! Game state: the value the reducer folds events into.

use crate::grid::{Grid, Player};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Moves are being accepted.
    Playing,
    /// A player completed a winning run.
    Won,
    /// The board filled without a winner.
    Draw,
}

/// Complete state of one game.
///
/// This is a plain data record: every transition replaces the whole state
/// through the reducer, so the fields carry no hidden coupling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// The board.
    pub grid: Grid,
    /// Player whose move is next; on a win, the player who won.
    pub current_player: Player,
    /// Lifecycle phase.
    pub status: GameStatus,
    /// Winner, present exactly when `status` is [`GameStatus::Won`].
    pub winner: Option<Player>,
    /// Number of accepted moves since the last reset.
    pub move_count: u32,
}

impl GameState {
    /// Returns true while moves are still being accepted.
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

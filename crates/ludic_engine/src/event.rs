//! Events: the only way game state changes.

use crate::grid::Position;
use serde::{Deserialize, Serialize};

/// A move intent or control event dispatched at the reducer.
///
/// Events are intents, not guaranteed effects: the reducer silently
/// absorbs any event that is illegal in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Place the current player's mark at an explicit cell.
    Place {
        /// Target cell.
        position: Position,
    },
    /// Drop the current player's mark into a gravity lane.
    ///
    /// Under vertical gravity the lane index is a column; under
    /// horizontal gravity it is a row. The field keeps its wire name
    /// either way.
    ActivateColumn {
        /// Lane index.
        col: i32,
    },
    /// Discard the state and rebuild the initial position.
    Reset,
}

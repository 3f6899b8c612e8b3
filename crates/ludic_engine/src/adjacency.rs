//! Declarative adjacency: which directions connect cells, and how.
//!
//! Win detection and capture never hard-code neighborhoods. They ask an
//! [`AdjacencyConfig`] for the enabled direction vectors and interpret them
//! under the configured [`AdjacencyMode`].

use crate::grid::Position;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How enabled directions combine when following a run of cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjacencyMode {
    /// Each direction is evaluated independently; runs are straight lines.
    Linear,
    /// All enabled directions form one neighborhood; runs may bend.
    Composite,
}

/// Declarative adjacency relation: a mode plus four direction-pair toggles.
///
/// Each toggle enables an opposing pair of unit vectors, so a run can be
/// extended from either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdjacencyConfig {
    /// Linear or composite interpretation of the enabled directions.
    pub mode: AdjacencyMode,
    /// Left/right neighbors.
    pub horizontal: bool,
    /// Up/down neighbors.
    pub vertical: bool,
    /// Top-left/bottom-right neighbors.
    pub back_diagonal: bool,
    /// Top-right/bottom-left neighbors.
    pub forward_diagonal: bool,
}

impl AdjacencyConfig {
    /// Returns true if at least one direction pair is enabled.
    pub fn any_enabled(&self) -> bool {
        self.horizontal || self.vertical || self.back_diagonal || self.forward_diagonal
    }

    /// Unit direction vectors for the enabled pairs, in a fixed order.
    ///
    /// Both members of each enabled pair are returned, so callers can walk
    /// runs from either end. With no pairs enabled the result is empty and
    /// every run query over it is vacuously false.
    pub fn enabled_directions(&self) -> Vec<Position> {
        let mut dirs = Vec::new();
        if self.horizontal {
            dirs.push(Position::new(0, -1));
            dirs.push(Position::new(0, 1));
        }
        if self.vertical {
            dirs.push(Position::new(-1, 0));
            dirs.push(Position::new(1, 0));
        }
        if self.back_diagonal {
            dirs.push(Position::new(-1, -1));
            dirs.push(Position::new(1, 1));
        }
        if self.forward_diagonal {
            dirs.push(Position::new(-1, 1));
            dirs.push(Position::new(1, -1));
        }
        dirs
    }
}

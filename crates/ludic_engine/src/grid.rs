//! Core board primitives: players, cell values, positions, and the grid.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Player in a two-player game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
)]
pub enum Player {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Contents of a single cell: a player's mark, or empty.
///
/// Serializes as `"X"`, `"O"`, or `null`, which is the shape the
/// configuration documents and state snapshots use on the wire.
pub type CellValue = Option<Player>;

/// A board coordinate in row-major space.
///
/// Coordinates are signed so that the same type doubles as a direction
/// vector and so that out-of-bounds intents coming off the wire can be
/// represented (and then rejected) rather than panicking at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: i32,
    /// Column index, 0 at the left.
    pub col: i32,
}

impl Position {
    /// Creates a position from row and column indices.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns this position offset by a direction vector.
    pub fn step(self, dir: Position) -> Self {
        Self {
            row: self.row + dir.row,
            col: self.col + dir.col,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular board of cells in row-major order.
///
/// The grid is a value type: mutating transitions go through
/// [`Grid::with_cell`] or [`Grid::replace_cells`], which produce new
/// grids and leave the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cells in row-major order (`row * width + col`).
    cells: Vec<CellValue>,
}

impl Grid {
    /// Creates an empty grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Creates a grid from existing cells.
    ///
    /// The cell vector length must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellValue>) -> Self {
        assert_eq!(cells.len(), width * height, "cell count must match dimensions");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Returns true if the position lies on the board.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    /// Gets the cell at a position, or `None` when off the board.
    pub fn get(&self, pos: Position) -> CellValue {
        self.index_of(pos).and_then(|idx| self.cells[idx])
    }

    /// Sets a cell in place; off-board positions are ignored.
    pub(crate) fn set_cell(&mut self, pos: Position, value: CellValue) {
        if let Some(idx) = self.index_of(pos) {
            self.cells[idx] = value;
        }
    }

    /// Returns a new grid with one cell replaced.
    pub fn with_cell(&self, pos: Position, value: CellValue) -> Self {
        let mut next = self.clone();
        next.set_cell(pos, value);
        next
    }

    /// Returns a new grid with the same dimensions and the given cells.
    ///
    /// The cell vector length must equal `width * height`.
    pub fn replace_cells(&self, cells: Vec<CellValue>) -> Self {
        Self::from_cells(self.width, self.height, cells)
    }

    /// Count of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cells[row * self.width + col] {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                };
                write!(f, "{symbol}")?;
                if col + 1 < self.width {
                    write!(f, " ")?;
                }
            }
            if row + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

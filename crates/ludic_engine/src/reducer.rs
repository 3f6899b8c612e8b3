//! The pure reducer: `state × event → state`.
//!
//! All gameplay flows through [`reduce`]. The reducer never panics and
//! never errors: an event that is illegal in the current state is
//! absorbed, returning the state unchanged. Given equal inputs it returns
//! equal outputs, so replaying an event log reproduces a game exactly.

use crate::adjacency::AdjacencyConfig;
use crate::capture::apply_capture_if_any;
use crate::config::{
    Config, GravityDirection, InputMode, OverflowPolicy, PlacementMode, SeedPlacement,
};
use crate::event::GameEvent;
use crate::grid::{Grid, Player, Position};
use crate::invariants::debug_assert_state;
use crate::rules::{check_winner, is_full};
use crate::state::{GameState, GameStatus};
use tracing::{debug, instrument};

/// Static rule projection handed to the reducer.
///
/// Built once from a validated [`Config`]; carries exactly the fields
/// move handling consults, so transitions never re-walk the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width.
    pub width: usize,
    /// Board height.
    pub height: usize,
    /// Run length that wins.
    pub win_length: usize,
    /// Adjacency relation for wins and captures.
    pub adjacency: AdjacencyConfig,
    /// How move intents are expressed.
    pub input: InputMode,
    /// How intents resolve to cells.
    pub placement: PlacementMode,
    /// Fall direction under gravity placement.
    pub gravity: GravityDirection,
    /// Full-lane behavior.
    pub overflow: OverflowPolicy,
    /// Whether placements must capture.
    pub capture: bool,
    /// Marks seeded at reset.
    pub initial: Vec<SeedPlacement>,
}

impl From<&Config> for GameConfig {
    fn from(config: &Config) -> Self {
        Self {
            width: config.grid.width,
            height: config.grid.height,
            win_length: config.win.length,
            adjacency: config.win.adjacency,
            input: config.input.mode,
            placement: config.placement.mode,
            gravity: config.gravity_direction(),
            overflow: config.placement.overflow,
            capture: config.capture_enabled(),
            initial: config.initial.clone(),
        }
    }
}

/// Builds the state a fresh game starts from: an empty grid with the
/// configured seeds applied, X to move, zero moves played.
///
/// Seeds do not count as moves and are not rechecked for wins here; the
/// validator warns about seed arrangements that already win.
#[instrument(skip(config))]
pub fn create_initial_state(config: &GameConfig) -> GameState {
    let mut grid = Grid::new(config.width, config.height);
    for seed in &config.initial {
        grid.set_cell(Position::new(seed.row, seed.col), Some(seed.player));
    }
    let state = GameState {
        grid,
        current_player: Player::X,
        status: GameStatus::Playing,
        winner: None,
        move_count: 0,
    };
    debug_assert_state(&state);
    state
}

/// Applies one event to the state, returning the next state.
///
/// Unknown-to-illegal intents (occupied cell, off-board target, wrong
/// placement mode, terminal game) return the input state unchanged.
#[instrument(skip(state, config), level = "debug")]
pub fn reduce(state: GameState, event: &GameEvent, config: &GameConfig) -> GameState {
    match event {
        GameEvent::Place { position } => handle_place(state, *position, config),
        GameEvent::ActivateColumn { col } => handle_activate_lane(state, *col, config),
        GameEvent::Reset => create_initial_state(config),
    }
}

fn handle_place(state: GameState, target: Position, config: &GameConfig) -> GameState {
    if !state.is_playing() {
        return state;
    }
    if !state.grid.in_bounds(target) {
        debug!(%target, "placement off the board");
        return state;
    }
    if state.grid.get(target).is_some() {
        debug!(%target, "cell already occupied");
        return state;
    }
    settle_placement(&state, &state.grid, target, config).unwrap_or(state)
}

fn handle_activate_lane(state: GameState, lane: i32, config: &GameConfig) -> GameState {
    if !state.is_playing() {
        return state;
    }
    if config.placement != PlacementMode::Gravity {
        return state;
    }
    let lane_count = match config.gravity {
        GravityDirection::Down | GravityDirection::Up => config.width,
        GravityDirection::Left | GravityDirection::Right => config.height,
    };
    if lane < 0 || lane as usize >= lane_count {
        debug!(lane, "lane out of range");
        return state;
    }
    let lane_cells = lane_positions(config.width, config.height, lane as usize, config.gravity);
    match lane_cells.iter().copied().find(|p| state.grid.get(*p).is_none()) {
        Some(target) => settle_placement(&state, &state.grid, target, config).unwrap_or(state),
        None => match config.overflow {
            OverflowPolicy::Reject => state,
            OverflowPolicy::PopOutBottom => pop_out(state, &lane_cells, config, true),
            OverflowPolicy::PopOutTop => pop_out(state, &lane_cells, config, false),
        },
    }
}

/// Cells of one gravity lane ordered from the wall to the entry end.
///
/// The wall is the edge marks fall toward; the entry end is where new
/// marks come in. Scanning this order front-to-back finds the landing
/// cell.
fn lane_positions(
    width: usize,
    height: usize,
    lane: usize,
    gravity: GravityDirection,
) -> Vec<Position> {
    match gravity {
        GravityDirection::Down => (0..height)
            .rev()
            .map(|row| Position::new(row as i32, lane as i32))
            .collect(),
        GravityDirection::Up => (0..height)
            .map(|row| Position::new(row as i32, lane as i32))
            .collect(),
        GravityDirection::Left => (0..width)
            .map(|col| Position::new(lane as i32, col as i32))
            .collect(),
        GravityDirection::Right => (0..width)
            .rev()
            .map(|col| Position::new(lane as i32, col as i32))
            .collect(),
    }
}

/// Handles a full lane under a pop-out policy.
///
/// With `eject_wall_end` the wall-end mark is removed and the rest of
/// the lane shifts one cell toward the wall; otherwise only the
/// entry-end mark is removed. Either way the mover's mark then enters at
/// the entry end, and the move settles like any other placement.
fn pop_out(
    state: GameState,
    lane_cells: &[Position],
    config: &GameConfig,
    eject_wall_end: bool,
) -> GameState {
    let Some(&entry) = lane_cells.last() else {
        return state;
    };
    let mut cells = state.grid.cells().to_vec();
    if eject_wall_end {
        for pair in lane_cells.windows(2) {
            if let (Some(to), Some(from)) =
                (state.grid.index_of(pair[0]), state.grid.index_of(pair[1]))
            {
                cells[to] = cells[from];
            }
        }
    }
    if let Some(entry_idx) = state.grid.index_of(entry) {
        cells[entry_idx] = None;
    }
    let shifted = state.grid.replace_cells(cells);
    settle_placement(&state, &shifted, entry, config).unwrap_or(state)
}

/// Commits a mark at `target` on `base`, then applies capture, win
/// detection, draw detection, and turn advancement, in that order.
///
/// Returns `None` when capture is mandatory and the move flips nothing;
/// callers absorb the event by keeping the prior state.
fn settle_placement(
    state: &GameState,
    base: &Grid,
    target: Position,
    config: &GameConfig,
) -> Option<GameState> {
    let mover = state.current_player;
    let marked = base.with_cell(target, Some(mover));
    let grid = if config.capture {
        let cells = apply_capture_if_any(&marked, target, mover, &config.adjacency)?;
        marked.replace_cells(cells)
    } else {
        marked
    };
    let move_count = state.move_count + 1;
    let next = if check_winner(&grid, mover, config.win_length, &config.adjacency) {
        GameState {
            grid,
            current_player: mover,
            status: GameStatus::Won,
            winner: Some(mover),
            move_count,
        }
    } else if is_full(&grid) {
        GameState {
            grid,
            current_player: mover,
            status: GameStatus::Draw,
            winner: None,
            move_count,
        }
    } else {
        GameState {
            grid,
            current_player: mover.opponent(),
            status: GameStatus::Playing,
            winner: None,
            move_count,
        }
    };
    debug_assert_state(&next);
    Some(next)
}

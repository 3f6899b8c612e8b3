//! Ludic engine - declarative, configuration-driven board game rules
//!
//! A single pure reducer plays any game a configuration document can
//! describe: tic-tac-toe, Connect 4, Gomoku, and Reversi-style capture
//! games all run on the same code paths, differing only in data.
//!
//! # Architecture
//!
//! - **Grid**: rectangular boards as immutable values
//! - **Adjacency**: declarative direction sets win and capture share
//! - **Reducer**: `state × event → state`, total and deterministic
//! - **Config**: strict JSON schema, multi-phase validator, solver seam
//! - **Contracts**: static composition rules checked before play
//!
//! # Example
//!
//! ```
//! use ludic_engine::{create_initial_state, preset, reduce, GameConfig, GameEvent, GameStatus, Position};
//!
//! let tic_tac_toe = preset("tic-tac-toe").expect("built-in preset");
//! let rules = GameConfig::from(&tic_tac_toe.config);
//!
//! let state = create_initial_state(&rules);
//! let state = reduce(
//!     state,
//!     &GameEvent::Place { position: Position::new(0, 0) },
//!     &rules,
//! );
//!
//! assert_eq!(state.move_count, 1);
//! assert_eq!(state.status, GameStatus::Playing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod adjacency;
mod capture;
mod config;
mod contracts;
mod event;
mod grid;
mod invariants;
mod presets;
mod reducer;
mod rules;
mod state;

// Crate-level exports - Board primitives
pub use grid::{CellValue, Grid, Player, Position};

// Crate-level exports - Adjacency
pub use adjacency::{AdjacencyConfig, AdjacencyMode};

// Crate-level exports - Rules
pub use capture::apply_capture_if_any;
pub use rules::{check_winner, is_full};

// Crate-level exports - State and events
pub use event::GameEvent;
pub use state::{GameState, GameStatus};

// Crate-level exports - Reducer
pub use reducer::{create_initial_state, reduce, GameConfig};

// Crate-level exports - Invariants
pub use invariants::{
    BoardShapeInvariant, DrawFullInvariant, Invariant, InvariantSet, InvariantViolation,
    StateInvariants, WinnerConsistentInvariant,
};

// Crate-level exports - Feature contracts
pub use contracts::{
    build_contracts, check_contracts, Capability, EndConditionKind, FeatureContract, PhaseHook,
    Slot,
};

// Crate-level exports - Configuration
pub use config::{
    validate_document, validate_document_with_solver, AssetKind, CaptureSpec, Config,
    ConstraintSolver, GravityDirection, GravitySpec, GridSpec, ImplicationSolver, InputMode,
    InputSpec, Metadata, OverflowPolicy, PathSegment, PlacementMode, PlacementSpec, RngSpec,
    SeedPlacement, TokenAsset, TokenDef, TokenPlacement, Topology, TurnMode, TurnSpec,
    Validated, ValidationIssue, ValidationReport, WinSpec,
};

// Crate-level exports - Presets
pub use presets::{all_presets, preset, search_presets, ExamplePreset};

//! Configuration: the document schema, its validator, and the solver
//! seam.

pub mod schema;
pub mod solver;
pub mod validate;

pub use schema::{
    AssetKind, CaptureSpec, Config, GravityDirection, GravitySpec, GridSpec, InputMode,
    InputSpec, Metadata, OverflowPolicy, PlacementMode, PlacementSpec, RngSpec, SeedPlacement,
    TokenAsset, TokenDef, TokenPlacement, Topology, TurnMode, TurnSpec, WinSpec,
};
pub use solver::{ConstraintSolver, ImplicationSolver};
pub use validate::{
    validate_document, validate_document_with_solver, PathSegment, Validated, ValidationIssue,
    ValidationReport,
};

//! First-class invariants over game state.
//!
//! Invariants are logical properties every reachable state satisfies.
//! They are testable independently, checked after each accepted
//! transition in debug builds, and serve as documentation of what the
//! reducer guarantees.

use crate::state::GameState;
use tracing::instrument;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples, so related invariants
/// compose into a single verification step.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns `Ok(())` if every invariant holds, or `Err` with one
    /// violation per failed invariant.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

pub mod board_shape;
pub mod draw_full;
pub mod winner_consistent;

pub use board_shape::BoardShapeInvariant;
pub use draw_full::DrawFullInvariant;
pub use winner_consistent::WinnerConsistentInvariant;

/// All game-state invariants as a composable set.
pub type StateInvariants = (
    BoardShapeInvariant,
    WinnerConsistentInvariant,
    DrawFullInvariant,
);

/// Asserts that all state invariants hold (panics on violation in debug
/// builds only).
#[instrument(skip(state))]
pub(crate) fn debug_assert_state(state: &GameState) {
    debug_assert!(
        StateInvariants::check_all(state).is_ok(),
        "state invariant violated: {:?}",
        StateInvariants::check_all(state)
    );
}

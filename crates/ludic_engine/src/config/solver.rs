//! Structural-constraint solving: the optional final validation phase.
//!
//! The solver re-derives the engine's composition rules from a clause
//! table instead of reusing the validator's checks, so the two phases
//! cross-check each other: a config both accept is consistent under two
//! independent encodings.

use super::schema::{Config, InputMode, OverflowPolicy, PlacementMode};
use tracing::instrument;

/// A solver that judges whether a parsed config's structural constraints
/// are satisfiable.
///
/// This is the seam for plugging in an external solver; the engine ships
/// [`ImplicationSolver`], a self-contained implementation of the same
/// contract.
pub trait ConstraintSolver {
    /// Returns `Ok` when every constraint is satisfiable, or the list of
    /// violated constraints.
    fn solve(&self, config: &Config) -> Result<(), Vec<String>>;
}

/// Built-in solver over a propositional encoding of the config.
///
/// Each config collapses to a handful of boolean atoms; the solver
/// evaluates a fixed table of implications over them plus two numeric
/// range constraints.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicationSolver;

/// One implication clause: `antecedent → consequent`.
struct Clause {
    name: &'static str,
    antecedent: bool,
    consequent: bool,
}

impl Clause {
    fn violated(&self) -> bool {
        self.antecedent && !self.consequent
    }
}

impl ConstraintSolver for ImplicationSolver {
    #[instrument(skip(self, config))]
    fn solve(&self, config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !config.win.adjacency.any_enabled() {
            errors.push("solver: no adjacency directions enabled".to_string());
        }

        let max_dim = config.grid.width.max(config.grid.height);
        if config.win.length < 2 || config.win.length > max_dim {
            errors.push("solver: win length out of bounds".to_string());
        }

        let column_input = config.input.mode == InputMode::Column;
        let gravity_placement = config.placement.mode == PlacementMode::Gravity;
        let gravity_enabled = config
            .placement
            .gravity
            .as_ref()
            .is_some_and(|g| g.enabled);
        let pop_out = config.placement.overflow != OverflowPolicy::Reject;

        let clauses = [
            Clause {
                name: "column input implies gravity placement",
                antecedent: column_input,
                consequent: gravity_placement,
            },
            Clause {
                name: "gravity placement implies enabled gravity settings",
                antecedent: gravity_placement,
                consequent: gravity_enabled,
            },
            Clause {
                name: "pop-out overflow implies gravity placement",
                antecedent: pop_out,
                consequent: gravity_placement,
            },
        ];
        for clause in &clauses {
            if clause.violated() {
                errors.push(format!("solver: unsatisfiable implication: {}", clause.name));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_all_presets_satisfiable() {
        for preset in presets::all_presets() {
            assert_eq!(
                ImplicationSolver.solve(&preset.config),
                Ok(()),
                "preset {} should be satisfiable",
                preset.id
            );
        }
    }

    #[test]
    fn test_column_input_without_gravity_is_unsat() {
        let mut config = presets::preset("tic-tac-toe").unwrap().config.clone();
        config.input.mode = InputMode::Column;
        let errors = ImplicationSolver.solve(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("column input")));
    }

    #[test]
    fn test_degenerate_win_length_is_unsat() {
        let mut config = presets::preset("tic-tac-toe").unwrap().config.clone();
        config.win.length = 1;
        let errors = ImplicationSolver.solve(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("win length")));
    }

    #[test]
    fn test_disabled_adjacency_is_unsat() {
        let mut config = presets::preset("gomoku").unwrap().config.clone();
        config.win.adjacency.horizontal = false;
        config.win.adjacency.vertical = false;
        config.win.adjacency.back_diagonal = false;
        config.win.adjacency.forward_diagonal = false;
        let errors = ImplicationSolver.solve(&config).unwrap_err();
        assert_eq!(errors, vec!["solver: no adjacency directions enabled".to_string()]);
    }
}

//! Feature contracts: static composition rules for configured features.
//!
//! Every configurable feature declares what it requires, what it
//! provides, which exclusive slot it occupies, and which reducer phases
//! it hooks. [`check_contracts`] verifies a feature set before play, so
//! incoherent configurations fail at validation time instead of
//! mid-game.

use crate::config::{Config, InputMode, OverflowPolicy, PlacementMode};
use std::collections::{BTreeMap, HashSet};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Vocabulary
// ─────────────────────────────────────────────────────────────

/// Capabilities features exchange.
///
/// A capability is satisfied when some feature in the active set
/// provides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Capability {
    /// A move intent has been resolved to a concrete cell.
    ResolvedCell,
    /// A move intent names a lane rather than a cell.
    TargetLine,
    /// An adjacency relation is available.
    Adjacency,
    /// Board cells can be written.
    CellsWritable,
    /// Some rule decides when the game ends.
    EndCondition,
}

/// Kinds of win conditions a config can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndConditionKind {
    /// A run of n connected cells wins.
    NInARow,
}

/// An exclusive slot a feature occupies.
///
/// At most one feature per slot kind may be active; two placement
/// policies in one config is a composition error regardless of which
/// policies they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// How intents resolve to cells.
    PlacementPolicy(PlacementMode),
    /// How the game ends.
    EndCondition(EndConditionKind),
}

impl Slot {
    /// The contention group this slot belongs to.
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::PlacementPolicy(_) => "PlacementPolicy",
            Slot::EndCondition(_) => "EndCondition",
        }
    }
}

/// Reducer phases a feature hooks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PhaseHook {
    /// Intent legality checks.
    ValidateInput,
    /// Resolving and writing the mark.
    ApplyPlacement,
    /// Post-placement effects such as capture or pop-out.
    ApplyEffects,
    /// Win and draw detection.
    CheckEnd,
    /// Turn advancement.
    NextTurn,
}

/// Static description of one composable feature.
#[derive(Debug, Clone)]
pub struct FeatureContract {
    /// Stable feature name used in error messages.
    pub id: &'static str,
    /// Capabilities this feature needs some other feature to provide.
    pub requires: Vec<Capability>,
    /// Capabilities this feature makes available.
    pub provides: Vec<Capability>,
    /// Exclusive slots this feature occupies.
    pub slots: Vec<Slot>,
    /// Reducer phases this feature participates in.
    pub hooks: Vec<PhaseHook>,
    /// Behavioral invariants the feature promises, by name.
    pub invariants: Vec<&'static str>,
}

// ─────────────────────────────────────────────────────────────
//  Catalog
// ─────────────────────────────────────────────────────────────

impl FeatureContract {
    /// Base provider: the board exposes writable cells.
    pub fn grid_cells() -> Self {
        Self {
            id: "GridCells",
            requires: vec![],
            provides: vec![Capability::CellsWritable],
            slots: vec![],
            hooks: vec![PhaseHook::ApplyPlacement],
            invariants: vec!["cellWritesStayInBounds"],
        }
    }

    /// Base provider: the win section supplies an adjacency relation.
    pub fn adjacency_provided() -> Self {
        Self {
            id: "AdjacencyProvided",
            requires: vec![],
            provides: vec![Capability::Adjacency],
            slots: vec![],
            hooks: vec![PhaseHook::ValidateInput],
            invariants: vec!["adjacencyHasDirection"],
        }
    }

    /// Base feature: turns alternate after each accepted move.
    pub fn turn_alternation() -> Self {
        Self {
            id: "TurnAlternation",
            requires: vec![],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::NextTurn],
            invariants: vec!["alternatesAfterNonTerminalMove"],
        }
    }

    /// Cell input: intents arrive as exact cells.
    pub fn input_target_cell() -> Self {
        Self {
            id: "InputTargetCell",
            requires: vec![],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::ValidateInput],
            invariants: vec![],
        }
    }

    /// Column input: intents arrive as lanes, which placement resolves.
    pub fn input_target_column() -> Self {
        Self {
            id: "InputTargetColumn",
            requires: vec![],
            provides: vec![Capability::TargetLine],
            slots: vec![],
            hooks: vec![PhaseHook::ValidateInput],
            invariants: vec![],
        }
    }

    /// Direct placement: the intent cell is the written cell.
    pub fn placement_direct() -> Self {
        Self {
            id: "PlacementDirect",
            requires: vec![Capability::CellsWritable],
            provides: vec![Capability::ResolvedCell],
            slots: vec![Slot::PlacementPolicy(PlacementMode::Direct)],
            hooks: vec![PhaseHook::ApplyPlacement],
            invariants: vec!["writesExactlyOneCell"],
        }
    }

    /// Gravity placement: a lane intent resolves to the landing cell.
    pub fn placement_gravity() -> Self {
        Self {
            id: "PlacementGravity",
            requires: vec![Capability::TargetLine, Capability::CellsWritable],
            provides: vec![Capability::ResolvedCell],
            slots: vec![Slot::PlacementPolicy(PlacementMode::Gravity)],
            hooks: vec![PhaseHook::ApplyPlacement],
            invariants: vec!["writesExactlyOneCell"],
        }
    }

    /// Reject overflow: a full lane absorbs the move.
    pub fn overflow_reject() -> Self {
        Self {
            id: "OverflowReject",
            requires: vec![],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::ApplyEffects],
            invariants: vec![],
        }
    }

    /// Pop-out at the wall end of a full lane.
    pub fn overflow_pop_out_bottom() -> Self {
        Self {
            id: "OverflowPopOutBottom",
            requires: vec![Capability::TargetLine],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::ApplyEffects],
            invariants: vec!["laneOccupancyConstant"],
        }
    }

    /// Pop-out at the entry end of a full lane.
    pub fn overflow_pop_out_top() -> Self {
        Self {
            id: "OverflowPopOutTop",
            requires: vec![Capability::TargetLine],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::ApplyEffects],
            invariants: vec!["laneOccupancyConstant"],
        }
    }

    /// Mandatory capture of enclosed opponent runs.
    pub fn capture() -> Self {
        Self {
            id: "Capture",
            requires: vec![
                Capability::ResolvedCell,
                Capability::Adjacency,
                Capability::CellsWritable,
            ],
            provides: vec![],
            slots: vec![],
            hooks: vec![PhaseHook::ApplyEffects],
            invariants: vec!["flipsOnlyOpponentCells"],
        }
    }

    /// N-in-a-row win condition.
    pub fn n_in_a_row() -> Self {
        Self {
            id: "NInARow",
            requires: vec![Capability::Adjacency],
            provides: vec![Capability::EndCondition],
            slots: vec![Slot::EndCondition(EndConditionKind::NInARow)],
            hooks: vec![PhaseHook::CheckEnd],
            invariants: vec!["winnerHasRunOfLength"],
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Assembly and checking
// ─────────────────────────────────────────────────────────────

/// Assembles the active feature set a config implies.
pub fn build_contracts(config: &Config) -> Vec<FeatureContract> {
    let mut contracts = vec![
        FeatureContract::grid_cells(),
        FeatureContract::adjacency_provided(),
        FeatureContract::turn_alternation(),
    ];
    contracts.push(match config.input.mode {
        InputMode::Cell => FeatureContract::input_target_cell(),
        InputMode::Column => FeatureContract::input_target_column(),
    });
    contracts.push(match config.placement.mode {
        PlacementMode::Direct => FeatureContract::placement_direct(),
        PlacementMode::Gravity => FeatureContract::placement_gravity(),
    });
    contracts.push(match config.placement.overflow {
        OverflowPolicy::Reject => FeatureContract::overflow_reject(),
        OverflowPolicy::PopOutBottom => FeatureContract::overflow_pop_out_bottom(),
        OverflowPolicy::PopOutTop => FeatureContract::overflow_pop_out_top(),
    });
    if config.capture_enabled() {
        contracts.push(FeatureContract::capture());
    }
    contracts.push(FeatureContract::n_in_a_row());
    contracts
}

/// Checks a feature set for slot contention and unsatisfied
/// capabilities. Returns one message per violation; an empty vector
/// means the set composes.
#[instrument(skip(contracts), fields(count = contracts.len()))]
pub fn check_contracts(contracts: &[FeatureContract]) -> Vec<String> {
    let mut errors = Vec::new();

    let mut slot_claims: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for contract in contracts {
        for slot in &contract.slots {
            slot_claims.entry(slot.kind()).or_default().push(contract.id);
        }
    }
    for (kind, claimants) in &slot_claims {
        if claimants.len() > 1 {
            errors.push(format!(
                "slot contention: {kind} claimed by {}",
                claimants.join(", ")
            ));
        }
    }

    let provided: HashSet<Capability> = contracts
        .iter()
        .flat_map(|c| c.provides.iter().copied())
        .collect();
    for contract in contracts {
        for capability in &contract.requires {
            if !provided.contains(capability) {
                errors.push(format!(
                    "feature {} requires capability {capability} but no feature provides it",
                    contract.id
                ));
            }
        }
    }

    errors
}

//! Multi-phase validation of configuration documents.
//!
//! Phases run in order and fail fast: a document with shape errors is
//! never cross-checked, and a cross-field inconsistency blocks the
//! contract check. Within a phase every problem is reported, each tagged
//! with the document path it was found at.

use super::schema::{Config, InputMode, OverflowPolicy, PlacementMode, TurnMode};
use super::solver::ConstraintSolver;
use crate::contracts::{build_contracts, check_contracts};
use crate::grid::Player;
use crate::reducer::{create_initial_state, GameConfig};
use crate::rules::check_winner;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Issues and reports
// ─────────────────────────────────────────────────────────────

/// One element of a document path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single problem found in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Where in the document the problem sits.
    pub path: Vec<PathSegment>,
    /// What is wrong there.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue at the given document path.
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Creates a document-level issue.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(vec!["root".into()], message)
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self
            .path
            .iter()
            .map(PathSegment::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{path}: {}", self.message)
    }
}

/// Everything wrong with a rejected document.
///
/// Carries any warnings collected before the failing phase, so callers
/// can still surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("configuration invalid: {} issue(s)", issues.len())]
pub struct ValidationReport {
    /// Problems, each tagged with a document path.
    pub issues: Vec<ValidationIssue>,
    /// Non-fatal observations.
    pub warnings: Vec<String>,
}

impl std::error::Error for ValidationReport {}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues,
            warnings: Vec::new(),
        }
    }
}

/// A document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// The parsed configuration.
    pub config: Config,
    /// Non-fatal observations about it.
    pub warnings: Vec<String>,
}

// ─────────────────────────────────────────────────────────────
//  Entry points
// ─────────────────────────────────────────────────────────────

/// Validates an untyped configuration document.
///
/// Runs the shape, cross-field, and contract phases. On success the
/// parsed [`Config`] is returned together with any warnings.
#[instrument(skip(value))]
pub fn validate_document(value: &Value) -> Result<Validated, ValidationReport> {
    validate_inner(value, None)
}

/// Validates a document and additionally runs a structural-constraint
/// solver as the final phase.
#[instrument(skip(value, solver))]
pub fn validate_document_with_solver(
    value: &Value,
    solver: &dyn ConstraintSolver,
) -> Result<Validated, ValidationReport> {
    validate_inner(value, Some(solver))
}

fn validate_inner(
    value: &Value,
    solver: Option<&dyn ConstraintSolver>,
) -> Result<Validated, ValidationReport> {
    let config = check_shape(value).map_err(|issues| {
        warn!(count = issues.len(), "document shape rejected");
        ValidationReport::from_issues(issues)
    })?;

    let issues = check_cross_field(&config);
    if !issues.is_empty() {
        warn!(count = issues.len(), "cross-field checks rejected document");
        return Err(ValidationReport::from_issues(issues));
    }

    let contract_errors = check_contracts(&build_contracts(&config));
    if !contract_errors.is_empty() {
        warn!(count = contract_errors.len(), "feature contracts rejected document");
        let issues = contract_errors
            .into_iter()
            .map(ValidationIssue::at_root)
            .collect();
        return Err(ValidationReport::from_issues(issues));
    }

    let warnings = collect_warnings(&config);
    if let Some(solver) = solver {
        if let Err(errors) = solver.solve(&config) {
            warn!(count = errors.len(), "solver rejected document");
            return Err(ValidationReport {
                issues: errors.into_iter().map(ValidationIssue::at_root).collect(),
                warnings,
            });
        }
    }

    Ok(Validated { config, warnings })
}

// ─────────────────────────────────────────────────────────────
//  Phase 1: shape
// ─────────────────────────────────────────────────────────────

const SECTIONS: [&str; 10] = [
    "metadata",
    "grid",
    "turn",
    "rng",
    "input",
    "tokens",
    "placement",
    "win",
    "placements",
    "initial",
];

/// Deserializes each top-level section independently, so one malformed
/// section does not mask problems in another.
fn check_shape(value: &Value) -> Result<Config, Vec<ValidationIssue>> {
    let Some(document) = value.as_object() else {
        return Err(vec![ValidationIssue::at_root("expected a configuration object")]);
    };

    let mut issues = Vec::new();
    for key in document.keys() {
        if !SECTIONS.contains(&key.as_str()) {
            issues.push(ValidationIssue::new(
                vec![key.as_str().into()],
                "unknown section",
            ));
        }
    }

    let metadata = section(document, "metadata", &mut issues);
    let grid = section(document, "grid", &mut issues);
    let turn = section(document, "turn", &mut issues);
    let rng = section(document, "rng", &mut issues);
    let input = section(document, "input", &mut issues);
    let tokens = section(document, "tokens", &mut issues);
    let placement = section(document, "placement", &mut issues);
    let win = section(document, "win", &mut issues);
    let placements = section(document, "placements", &mut issues);
    let initial = section(document, "initial", &mut issues);

    match (
        metadata, grid, turn, rng, input, tokens, placement, win, placements, initial,
    ) {
        (
            Some(metadata),
            Some(grid),
            Some(turn),
            Some(rng),
            Some(input),
            Some(tokens),
            Some(placement),
            Some(win),
            Some(placements),
            Some(initial),
        ) if issues.is_empty() => Ok(Config {
            metadata,
            grid,
            turn,
            rng,
            input,
            tokens,
            placement,
            win,
            placements,
            initial,
        }),
        _ => Err(issues),
    }
}

fn section<T: DeserializeOwned>(
    document: &serde_json::Map<String, Value>,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<T> {
    match document.get(key) {
        None => {
            issues.push(ValidationIssue::new(vec![key.into()], "missing required section"));
            None
        }
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                issues.push(ValidationIssue::new(vec![key.into()], err.to_string()));
                None
            }
        },
    }
}

// ─────────────────────────────────────────────────────────────
//  Phase 2: cross-field consistency
// ─────────────────────────────────────────────────────────────

/// Largest board the validator accepts, as a total cell count.
const MAX_GRID_CELLS: usize = 10_000;

/// Checks relationships between sections. All problems in this phase
/// are reported together.
fn check_cross_field(config: &Config) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.grid.width == 0 {
        issues.push(ValidationIssue::new(
            vec!["grid".into(), "width".into()],
            "width must be at least 1",
        ));
    }
    if config.grid.height == 0 {
        issues.push(ValidationIssue::new(
            vec!["grid".into(), "height".into()],
            "height must be at least 1",
        ));
    }
    if config
        .grid
        .width
        .checked_mul(config.grid.height)
        .is_none_or(|cells| cells > MAX_GRID_CELLS)
    {
        issues.push(ValidationIssue::new(
            vec!["grid".into()],
            format!(
                "a {}x{} grid exceeds the {MAX_GRID_CELLS}-cell maximum",
                config.grid.width, config.grid.height
            ),
        ));
    }

    let max_dim = config.grid.width.max(config.grid.height);
    if config.win.length < 2 || config.win.length > max_dim {
        issues.push(ValidationIssue::new(
            vec!["win".into(), "length".into()],
            format!("win length must be between 2 and {max_dim}"),
        ));
    }

    if !config.win.adjacency.any_enabled() {
        issues.push(ValidationIssue::new(
            vec!["win".into(), "adjacency".into()],
            "at least one adjacency direction must be enabled",
        ));
    }

    if config.input.mode == InputMode::Column && config.placement.mode != PlacementMode::Gravity {
        issues.push(ValidationIssue::new(
            vec!["input".into(), "mode".into()],
            "column input requires gravity placement",
        ));
    }

    if config.placement.overflow != OverflowPolicy::Reject
        && config.placement.mode != PlacementMode::Gravity
    {
        issues.push(ValidationIssue::new(
            vec!["placement".into(), "overflow".into()],
            "pop-out overflow requires gravity placement",
        ));
    }

    if config.placement.mode == PlacementMode::Gravity {
        match &config.placement.gravity {
            Some(gravity) if gravity.enabled => {}
            Some(_) => issues.push(ValidationIssue::new(
                vec!["placement".into(), "gravity".into()],
                "gravity placement requires gravity to be enabled",
            )),
            None => issues.push(ValidationIssue::new(
                vec!["placement".into(), "gravity".into()],
                "gravity placement requires a gravity section",
            )),
        }
    }

    for (index, placement) in config.placements.iter().enumerate() {
        if !on_grid(config, placement.row, placement.col) {
            issues.push(ValidationIssue::new(
                vec!["placements".into(), index.into()],
                format!(
                    "position ({}, {}) is outside the {}x{} grid",
                    placement.row, placement.col, config.grid.width, config.grid.height
                ),
            ));
        }
        if !config.tokens.iter().any(|token| token.id == placement.token_id) {
            issues.push(ValidationIssue::new(
                vec!["placements".into(), index.into(), "tokenId".into()],
                format!("unknown token id \"{}\"", placement.token_id),
            ));
        }
    }

    let mut seen = HashSet::new();
    for (index, seed) in config.initial.iter().enumerate() {
        if !on_grid(config, seed.row, seed.col) {
            issues.push(ValidationIssue::new(
                vec!["initial".into(), index.into()],
                format!(
                    "position ({}, {}) is outside the {}x{} grid",
                    seed.row, seed.col, config.grid.width, config.grid.height
                ),
            ));
        }
        if !seen.insert((seed.row, seed.col)) {
            issues.push(ValidationIssue::new(
                vec!["initial".into(), index.into()],
                format!("duplicate seed at ({}, {})", seed.row, seed.col),
            ));
        }
    }

    issues
}

fn on_grid(config: &Config, row: i32, col: i32) -> bool {
    row >= 0
        && col >= 0
        && (row as usize) < config.grid.height
        && (col as usize) < config.grid.width
}

// ─────────────────────────────────────────────────────────────
//  Warnings
// ─────────────────────────────────────────────────────────────

/// Non-fatal observations about a structurally sound document.
fn collect_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.turn.mode == TurnMode::Realtime {
        warnings.push(
            "turn.mode \"realtime\" is reserved; the reducer runs turn-based".to_string(),
        );
    }

    // Seeds are applied verbatim at reset, so an arrangement that already
    // wins would start the game in a playing state nobody can escape.
    if !config.initial.is_empty() {
        let initial = create_initial_state(&GameConfig::from(config));
        for player in [Player::X, Player::O] {
            if check_winner(&initial.grid, player, config.win.length, &config.win.adjacency) {
                warnings.push(format!(
                    "initial seeds already contain a winning run for {player}"
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImplicationSolver;
    use serde_json::json;

    /// A minimal valid document to mutate per test.
    fn base_document() -> Value {
        json!({
            "metadata": { "name": "Test Game", "version": 1 },
            "grid": { "width": 3, "height": 3, "topology": "rectangle", "wrap": false },
            "turn": { "mode": "turn" },
            "rng": { "seed": 42 },
            "input": { "mode": "cell" },
            "tokens": [
                {
                    "id": "x",
                    "label": "Cross",
                    "players": ["X"],
                    "asset": { "type": "image", "url": "/assets/tokens/x.png" }
                }
            ],
            "placement": { "mode": "direct", "overflow": "reject" },
            "win": {
                "length": 3,
                "adjacency": {
                    "mode": "linear",
                    "horizontal": true,
                    "vertical": true,
                    "backDiagonal": true,
                    "forwardDiagonal": true
                }
            },
            "placements": [],
            "initial": []
        })
    }

    fn issue_paths(report: &ValidationReport) -> Vec<String> {
        report
            .issues
            .iter()
            .map(|issue| {
                issue
                    .path
                    .iter()
                    .map(PathSegment::to_string)
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .collect()
    }

    #[test]
    fn test_base_document_is_valid() {
        let validated = validate_document(&base_document()).unwrap();
        assert_eq!(validated.config.metadata.name, "Test Game");
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_non_object_document_rejected() {
        let report = validate_document(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["root"]);
    }

    #[test]
    fn test_missing_section_reported_at_its_key() {
        let mut document = base_document();
        document.as_object_mut().unwrap().remove("win");
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["win"]);
        assert!(report.issues[0].message.contains("missing"));
    }

    #[test]
    fn test_unknown_top_level_section_rejected() {
        let mut document = base_document();
        document["physics"] = json!({ "gravity": 9.8 });
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["physics"]);
    }

    #[test]
    fn test_malformed_sections_reported_independently() {
        let mut document = base_document();
        document["grid"]["width"] = json!("wide");
        document["turn"]["mode"] = json!("sometimes");
        let report = validate_document(&document).unwrap_err();
        let paths = issue_paths(&report);
        assert!(paths.contains(&"grid".to_string()));
        assert!(paths.contains(&"turn".to_string()));
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn test_column_input_without_gravity_flagged_at_input_mode() {
        let mut document = base_document();
        document["input"]["mode"] = json!("column");
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["input.mode"]);
        assert_eq!(
            report.issues[0].path,
            vec![PathSegment::Key("input".into()), PathSegment::Key("mode".into())]
        );
    }

    #[test]
    fn test_no_adjacency_directions_flagged_at_win_adjacency() {
        let mut document = base_document();
        for key in ["horizontal", "vertical", "backDiagonal", "forwardDiagonal"] {
            document["win"]["adjacency"][key] = json!(false);
        }
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["win.adjacency"]);
    }

    #[test]
    fn test_win_length_bounds() {
        let mut document = base_document();
        document["win"]["length"] = json!(4);
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["win.length"]);

        let mut document = base_document();
        document["win"]["length"] = json!(1);
        assert!(validate_document(&document).is_err());
    }

    #[test]
    fn test_cross_field_issues_are_collected_together() {
        let mut document = base_document();
        document["input"]["mode"] = json!("column");
        document["win"]["length"] = json!(9);
        let report = validate_document(&document).unwrap_err();
        let paths = issue_paths(&report);
        assert!(paths.contains(&"input.mode".to_string()));
        assert!(paths.contains(&"win.length".to_string()));
    }

    #[test]
    fn test_shape_errors_block_cross_field_phase() {
        let mut document = base_document();
        document.as_object_mut().unwrap().remove("rng");
        document["input"]["mode"] = json!("column"); // would fail phase 2
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["rng"]);
    }

    #[test]
    fn test_seed_out_of_bounds_and_duplicates() {
        let mut document = base_document();
        document["initial"] = json!([
            { "row": 0, "col": 0, "player": "X" },
            { "row": 5, "col": 0, "player": "O" },
            { "row": 0, "col": 0, "player": "O" }
        ]);
        let report = validate_document(&document).unwrap_err();
        let paths = issue_paths(&report);
        assert_eq!(paths, vec!["initial.1", "initial.2"]);
    }

    #[test]
    fn test_unknown_token_id_in_placements() {
        let mut document = base_document();
        document["placements"] = json!([{ "row": 0, "col": 0, "tokenId": "ghost" }]);
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["placements.0.tokenId"]);
    }

    #[test]
    fn test_gravity_mode_requires_gravity_section() {
        let mut document = base_document();
        document["input"]["mode"] = json!("column");
        document["placement"]["mode"] = json!("gravity");
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["placement.gravity"]);

        document["placement"]["gravity"] =
            json!({ "enabled": false, "direction": "down", "wrap": false });
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["placement.gravity"]);
    }

    #[test]
    fn test_gravity_with_cell_input_fails_contract_phase() {
        let mut document = base_document();
        document["placement"]["mode"] = json!("gravity");
        document["placement"]["gravity"] =
            json!({ "enabled": true, "direction": "down", "wrap": false });
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["root"]);
        assert!(report.issues[0].message.contains("TargetLine"));
    }

    #[test]
    fn test_realtime_turn_mode_warns_but_passes() {
        let mut document = base_document();
        document["turn"]["mode"] = json!("realtime");
        let validated = validate_document(&document).unwrap();
        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].contains("realtime"));
    }

    #[test]
    fn test_winning_seed_arrangement_warns_but_passes() {
        let mut document = base_document();
        document["initial"] = json!([
            { "row": 0, "col": 0, "player": "X" },
            { "row": 0, "col": 1, "player": "X" },
            { "row": 0, "col": 2, "player": "X" }
        ]);
        let validated = validate_document(&document).unwrap();
        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].contains("X"));
    }

    #[test]
    fn test_oversized_grid_flagged_at_grid() {
        // Dimensions whose product overflows usize must come back as a
        // report, never reach board construction.
        let mut document = base_document();
        document["grid"]["width"] = json!(5_000_000_000u64);
        document["grid"]["height"] = json!(5_000_000_000u64);
        document["win"]["length"] = json!(2);
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["grid"]);
        assert!(report.issues[0].message.contains("maximum"));

        // A representable product over the cap is rejected the same way.
        let mut document = base_document();
        document["grid"]["width"] = json!(100_000);
        document["grid"]["height"] = json!(1);
        let report = validate_document(&document).unwrap_err();
        assert_eq!(issue_paths(&report), vec!["grid"]);
    }

    #[test]
    fn test_solver_phase_runs_after_the_others() {
        let document = base_document();
        let validated = validate_document_with_solver(&document, &ImplicationSolver).unwrap();
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_issue_display_joins_path() {
        let issue = ValidationIssue::new(
            vec!["placements".into(), 1usize.into(), "tokenId".into()],
            "unknown token id",
        );
        assert_eq!(issue.to_string(), "placements.1.tokenId: unknown token id");
    }
}

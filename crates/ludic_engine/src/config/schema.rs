//! The declarative configuration document.
//!
//! Every struct here mirrors one section of the JSON config format. All
//! sections are strict: unknown keys are structural errors, so typos fail
//! loudly instead of silently configuring nothing.

use crate::adjacency::AdjacencyConfig;
use crate::grid::Player;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display name and format version of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// Human-readable name of the game.
    pub name: String,
    /// Config format version.
    pub version: u32,
}

/// Board topology. Only rectangles exist today; the field reserves the
/// name for future shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// A flat rectangular board.
    Rectangle,
}

/// Board dimensions and topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Board shape.
    pub topology: Topology,
    /// Reserved: edge wrapping is parsed but not yet interpreted.
    pub wrap: bool,
}

/// Turn-taking discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnMode {
    /// Strict alternation driven by the reducer.
    Turn,
    /// Reserved: accepted by the schema, not interpreted by the reducer.
    Realtime,
}

/// Turn configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TurnSpec {
    /// Turn-taking discipline.
    pub mode: TurnMode,
}

/// Random seed carried for reproducibility.
///
/// The reducer is fully deterministic and never draws randomness; the
/// seed is preserved so configs stay forward-compatible with stochastic
/// features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RngSpec {
    /// Seed value.
    pub seed: u64,
}

/// How players express a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Pick an exact cell.
    Cell,
    /// Pick a gravity lane and let the engine resolve the cell.
    Column,
}

/// Input configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    /// How players express a move.
    pub mode: InputMode,
}

/// Asset kinds a token can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A bitmap or vector image addressed by URL.
    Image,
}

/// Visual asset for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TokenAsset {
    /// Asset kind discriminator.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Where to load the asset from.
    pub url: String,
}

/// A piece type available to one or both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TokenDef {
    /// Identifier referenced by `placements`.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Players allowed to use this token.
    pub players: Vec<Player>,
    /// How the token renders.
    pub asset: TokenAsset,
}

/// A decorative token pinned to a cell at setup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenPlacement {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
    /// Token identifier; must name an entry in `tokens`.
    pub token_id: String,
}

/// A mark seeded onto the board before the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SeedPlacement {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
    /// Owner of the seeded mark.
    pub player: Player,
}

/// How a move intent resolves to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// The intent names the exact cell.
    Direct,
    /// The intent names a lane; gravity resolves the cell.
    Gravity,
}

/// Direction marks fall under gravity placement.
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
pub enum GravityDirection {
    /// Marks fall toward the bottom row.
    Down,
    /// Marks fall toward the top row.
    Up,
    /// Marks fall toward the leftmost column.
    Left,
    /// Marks fall toward the rightmost column.
    Right,
}

/// Gravity settings for lane placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GravitySpec {
    /// Whether gravity is active.
    pub enabled: bool,
    /// Which board edge marks fall toward.
    pub direction: GravityDirection,
    /// Reserved: lane wrapping is parsed but not yet interpreted.
    pub wrap: bool,
}

/// What happens when a move targets a full lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// The move is absorbed and the state is unchanged.
    Reject,
    /// The wall-end mark is ejected, the lane shifts toward the wall,
    /// and the new mark enters at the entry end.
    PopOutBottom,
    /// The entry-end mark is ejected and the new mark replaces it.
    PopOutTop,
}

/// Capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CaptureSpec {
    /// Whether placements must capture and flip opponent runs.
    pub enabled: bool,
}

/// Placement rules: how intents become marks on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PlacementSpec {
    /// Direct or gravity resolution.
    pub mode: PlacementMode,
    /// Gravity settings; required when `mode` is gravity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<GravitySpec>,
    /// Full-lane behavior.
    pub overflow: OverflowPolicy,
    /// Capture settings; absent means capture is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<CaptureSpec>,
}

/// Win condition: run length and the adjacency relation runs follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WinSpec {
    /// Minimum run length that wins.
    pub length: usize,
    /// Which directions connect cells, and how.
    pub adjacency: AdjacencyConfig,
}

/// A complete game description.
///
/// The document is data, not code: two configs that serialize equal play
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name and version.
    pub metadata: Metadata,
    /// Board dimensions.
    pub grid: GridSpec,
    /// Turn discipline.
    pub turn: TurnSpec,
    /// Reproducibility seed.
    pub rng: RngSpec,
    /// Move input mode.
    pub input: InputSpec,
    /// Available piece types.
    pub tokens: Vec<TokenDef>,
    /// Placement rules.
    pub placement: PlacementSpec,
    /// Win condition.
    pub win: WinSpec,
    /// Decorative token placements.
    pub placements: Vec<TokenPlacement>,
    /// Marks seeded before the first move.
    pub initial: Vec<SeedPlacement>,
}

impl Config {
    /// Returns true when capture is present and switched on.
    pub fn capture_enabled(&self) -> bool {
        self.placement.capture.as_ref().is_some_and(|c| c.enabled)
    }

    /// Gravity direction, defaulting to down when gravity is absent.
    pub fn gravity_direction(&self) -> GravityDirection {
        self.placement
            .gravity
            .as_ref()
            .map(|g| g.direction)
            .unwrap_or(GravityDirection::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_wire_names() {
        assert_eq!(
            serde_json::to_string(&OverflowPolicy::PopOutBottom).unwrap(),
            "\"pop_out_bottom\""
        );
        assert_eq!(
            serde_json::to_string(&OverflowPolicy::PopOutTop).unwrap(),
            "\"pop_out_top\""
        );
        assert_eq!(serde_json::to_string(&OverflowPolicy::Reject).unwrap(), "\"reject\"");
    }

    #[test]
    fn test_token_asset_wire_shape() {
        let asset: TokenAsset =
            serde_json::from_str(r#"{"type":"image","url":"/assets/tokens/x.png"}"#).unwrap();
        assert_eq!(asset.kind, AssetKind::Image);
        let json = serde_json::to_string(&asset).unwrap();
        assert!(json.contains("\"type\":\"image\""));
    }

    #[test]
    fn test_placement_gravity_is_optional() {
        let spec: PlacementSpec =
            serde_json::from_str(r#"{"mode":"direct","overflow":"reject"}"#).unwrap();
        assert!(spec.gravity.is_none());
        assert!(spec.capture.is_none());
        // Absent sections stay absent on the way back out.
        assert_eq!(
            serde_json::to_string(&spec).unwrap(),
            r#"{"mode":"direct","overflow":"reject"}"#
        );
    }

    #[test]
    fn test_unknown_section_key_rejected() {
        let err = serde_json::from_str::<GridSpec>(
            r#"{"width":3,"height":3,"topology":"rectangle","wrap":false,"depth":1}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let err = serde_json::from_str::<GridSpec>(
            r#"{"width":-3,"height":3,"topology":"rectangle","wrap":false}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_schema_exports_all_sections() {
        let schema = schemars::schema_for!(Config);
        let value = serde_json::to_value(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for section in [
            "metadata", "grid", "turn", "rng", "input", "tokens", "placement", "win",
            "placements", "initial",
        ] {
            assert!(properties.contains_key(section), "missing section {section}");
        }
    }
}

//! Built-in example configurations.
//!
//! Five classics exercise every engine feature between them: direct and
//! gravity placement, cell and column input, capture, and both overflow
//! policies. They double as documentation of the config format and as
//! fixtures for the validator tests.

use crate::adjacency::{AdjacencyConfig, AdjacencyMode};
use crate::config::{
    AssetKind, CaptureSpec, Config, GravityDirection, GravitySpec, GridSpec, InputMode,
    InputSpec, Metadata, OverflowPolicy, PlacementMode, PlacementSpec, RngSpec, SeedPlacement,
    TokenAsset, TokenDef, Topology, TurnMode, TurnSpec, WinSpec,
};
use crate::grid::Player;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// A named example configuration with browse metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamplePreset {
    /// Stable identifier used for lookup.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Search tags.
    pub tags: &'static [&'static str],
    /// One-line description.
    pub description: &'static str,
    /// The full configuration.
    pub config: Config,
}

static REGISTRY: LazyLock<BTreeMap<&'static str, ExamplePreset>> = LazyLock::new(|| {
    [
        tic_tac_toe(),
        connect_4(),
        gomoku(),
        reversi(),
        connect_4_popout(),
    ]
    .into_iter()
    .map(|preset| (preset.id, preset))
    .collect()
});

/// All presets, ordered by id.
pub fn all_presets() -> impl Iterator<Item = &'static ExamplePreset> {
    REGISTRY.values()
}

/// Looks up a preset by its identifier.
pub fn preset(id: &str) -> Option<&'static ExamplePreset> {
    REGISTRY.get(id)
}

/// Case-insensitive substring search over names, tags, and
/// descriptions. An empty query returns everything.
pub fn search_presets(query: &str) -> Vec<&'static ExamplePreset> {
    if query.is_empty() {
        return all_presets().collect();
    }
    let needle = query.to_lowercase();
    all_presets()
        .filter(|preset| {
            preset.name.to_lowercase().contains(&needle)
                || preset.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
                || preset.description.to_lowercase().contains(&needle)
        })
        .collect()
}

fn token(id: &str, label: &str, player: Player, url: &str) -> TokenDef {
    TokenDef {
        id: id.to_string(),
        label: label.to_string(),
        players: vec![player],
        asset: TokenAsset {
            kind: AssetKind::Image,
            url: url.to_string(),
        },
    }
}

fn linear_all_directions() -> AdjacencyConfig {
    AdjacencyConfig {
        mode: AdjacencyMode::Linear,
        horizontal: true,
        vertical: true,
        back_diagonal: true,
        forward_diagonal: true,
    }
}

fn standard_sections(width: usize, height: usize) -> (GridSpec, TurnSpec, RngSpec) {
    (
        GridSpec {
            width,
            height,
            topology: Topology::Rectangle,
            wrap: false,
        },
        TurnSpec {
            mode: TurnMode::Turn,
        },
        RngSpec { seed: 42 },
    )
}

fn tic_tac_toe() -> ExamplePreset {
    let (grid, turn, rng) = standard_sections(3, 3);
    ExamplePreset {
        id: "tic-tac-toe",
        name: "Tic-Tac-Toe",
        tags: &["classic", "3x3", "linear", "turn-based"],
        description: "The timeless 3x3 grid game. Get three in a row horizontally, vertically, or diagonally.",
        config: Config {
            metadata: Metadata {
                name: "Tic-Tac-Toe".to_string(),
                version: 1,
            },
            grid,
            turn,
            rng,
            input: InputSpec {
                mode: InputMode::Cell,
            },
            tokens: vec![
                token("X", "X", Player::X, "/assets/tokens/x.png"),
                token("O", "O", Player::O, "/assets/tokens/o.png"),
            ],
            placement: PlacementSpec {
                mode: PlacementMode::Direct,
                gravity: None,
                overflow: OverflowPolicy::Reject,
                capture: None,
            },
            win: WinSpec {
                length: 3,
                adjacency: linear_all_directions(),
            },
            placements: vec![],
            initial: vec![],
        },
    }
}

fn connect_4() -> ExamplePreset {
    let (grid, turn, rng) = standard_sections(7, 6);
    ExamplePreset {
        id: "connect-4",
        name: "Connect 4",
        tags: &["classic", "7x6", "gravity", "column-activation"],
        description: "Drop tokens into columns; first to connect four wins.",
        config: Config {
            metadata: Metadata {
                name: "Connect 4".to_string(),
                version: 1,
            },
            grid,
            turn,
            rng,
            input: InputSpec {
                mode: InputMode::Column,
            },
            tokens: vec![
                token("disc-red", "R", Player::X, "/assets/tokens/disc-red.png"),
                token("disc-yellow", "Y", Player::O, "/assets/tokens/disc-yellow.png"),
            ],
            placement: PlacementSpec {
                mode: PlacementMode::Gravity,
                gravity: Some(GravitySpec {
                    enabled: true,
                    direction: GravityDirection::Down,
                    wrap: false,
                }),
                overflow: OverflowPolicy::Reject,
                capture: None,
            },
            win: WinSpec {
                length: 4,
                adjacency: linear_all_directions(),
            },
            placements: vec![],
            initial: vec![],
        },
    }
}

fn gomoku() -> ExamplePreset {
    let (grid, turn, rng) = standard_sections(15, 15);
    ExamplePreset {
        id: "gomoku",
        name: "Gomoku",
        tags: &["classic", "15x15", "n-in-a-row", "direct"],
        description: "Place stones on a 15x15 board; first to five in a row wins.",
        config: Config {
            metadata: Metadata {
                name: "Gomoku".to_string(),
                version: 1,
            },
            grid,
            turn,
            rng,
            input: InputSpec {
                mode: InputMode::Cell,
            },
            tokens: vec![
                token("stone-black", "●", Player::X, "/assets/tokens/stone-black.png"),
                token("stone-white", "○", Player::O, "/assets/tokens/stone-white.png"),
            ],
            placement: PlacementSpec {
                mode: PlacementMode::Direct,
                gravity: None,
                overflow: OverflowPolicy::Reject,
                capture: None,
            },
            win: WinSpec {
                length: 5,
                adjacency: linear_all_directions(),
            },
            placements: vec![],
            initial: vec![],
        },
    }
}

fn reversi() -> ExamplePreset {
    let (grid, turn, rng) = standard_sections(8, 8);
    ExamplePreset {
        id: "reversi",
        name: "Reversi / Othello",
        tags: &["classic", "capture", "8x8"],
        description: "Sandwich opponent stones to flip them; valid move must capture at least one line.",
        config: Config {
            metadata: Metadata {
                name: "Reversi".to_string(),
                version: 1,
            },
            grid,
            turn,
            rng,
            input: InputSpec {
                mode: InputMode::Cell,
            },
            tokens: vec![
                token("disk-black", "●", Player::X, "/assets/tokens/disk-black.png"),
                token("disk-white", "○", Player::O, "/assets/tokens/disk-white.png"),
            ],
            placement: PlacementSpec {
                mode: PlacementMode::Direct,
                gravity: None,
                overflow: OverflowPolicy::Reject,
                capture: Some(CaptureSpec { enabled: true }),
            },
            win: WinSpec {
                length: 5,
                adjacency: linear_all_directions(),
            },
            placements: vec![],
            initial: vec![
                SeedPlacement {
                    row: 3,
                    col: 3,
                    player: Player::O,
                },
                SeedPlacement {
                    row: 3,
                    col: 4,
                    player: Player::X,
                },
                SeedPlacement {
                    row: 4,
                    col: 3,
                    player: Player::X,
                },
                SeedPlacement {
                    row: 4,
                    col: 4,
                    player: Player::O,
                },
            ],
        },
    }
}

fn connect_4_popout() -> ExamplePreset {
    let (grid, turn, rng) = standard_sections(7, 6);
    ExamplePreset {
        id: "connect-4-popout",
        name: "Connect 4 (Pop Out)",
        tags: &["classic", "7x6", "gravity", "pop-out"],
        description: "Connect Four with Pop Out: eject your bottom token to shift the column.",
        config: Config {
            metadata: Metadata {
                name: "Connect 4 Pop Out".to_string(),
                version: 1,
            },
            grid,
            turn,
            rng,
            input: InputSpec {
                mode: InputMode::Column,
            },
            tokens: vec![
                token("disc-red", "R", Player::X, "/assets/tokens/disc-red.png"),
                token("disc-yellow", "Y", Player::O, "/assets/tokens/disc-yellow.png"),
            ],
            placement: PlacementSpec {
                mode: PlacementMode::Gravity,
                gravity: Some(GravitySpec {
                    enabled: true,
                    direction: GravityDirection::Down,
                    wrap: false,
                }),
                overflow: OverflowPolicy::PopOutBottom,
                capture: None,
            },
            win: WinSpec {
                length: 4,
                adjacency: linear_all_directions(),
            },
            placements: vec![],
            initial: vec![],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_five_presets() {
        let ids: Vec<&str> = all_presets().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec!["connect-4", "connect-4-popout", "gomoku", "reversi", "tic-tac-toe"]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(preset("gomoku").unwrap().config.grid.width, 15);
        assert!(preset("chess").is_none());
    }

    #[test]
    fn test_search_matches_tags_and_names() {
        let gravity: Vec<&str> = search_presets("gravity").iter().map(|p| p.id).collect();
        assert_eq!(gravity, vec!["connect-4", "connect-4-popout"]);

        let othello: Vec<&str> = search_presets("othello").iter().map(|p| p.id).collect();
        assert_eq!(othello, vec!["reversi"]);

        assert_eq!(search_presets("").len(), 5);
        assert!(search_presets("backgammon").is_empty());
    }

    #[test]
    fn test_reversi_seeds_the_center() {
        let config = &preset("reversi").unwrap().config;
        assert_eq!(config.initial.len(), 4);
        assert!(config.capture_enabled());
        let at = |row, col| {
            config
                .initial
                .iter()
                .find(|s| s.row == row && s.col == col)
                .map(|s| s.player)
        };
        assert_eq!(at(3, 3), Some(Player::O));
        assert_eq!(at(3, 4), Some(Player::X));
        assert_eq!(at(4, 3), Some(Player::X));
        assert_eq!(at(4, 4), Some(Player::O));
    }

    #[test]
    fn test_presets_round_trip_through_json() {
        for preset in all_presets() {
            let json = serde_json::to_string(&preset.config).unwrap();
            let back: Config = serde_json::from_str(&json).unwrap();
            assert_eq!(back, preset.config, "preset {} should round-trip", preset.id);
        }
    }
}

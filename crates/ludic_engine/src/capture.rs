//! Reversi-style capture: flipping opponent runs closed off by the mover.
//!
//! Capture reuses the adjacency relation that win detection uses, so a
//! configuration that narrows the enabled directions narrows capture in
//! the same stroke.

use crate::adjacency::{AdjacencyConfig, AdjacencyMode};
use crate::grid::{CellValue, Grid, Player, Position};
use std::collections::HashSet;
use tracing::instrument;

/// Computes capture flips for a mark just placed at `placed`.
///
/// The grid must already contain the mover's mark at `placed`. Returns
/// the full replacement cell vector with every captured cell flipped to
/// `player`, or `None` when nothing is captured anywhere. Callers treat
/// `None` as "this move captures nothing", which doubles as the legality
/// test when capture is mandatory.
///
/// In linear mode a line is an outward straight walk per enabled
/// direction: strictly opponent cells terminated by a friendly cell flip;
/// hitting the edge or an empty cell leaves the line unflipped. Composite
/// mode searches bending opponent chains through every enabled direction
/// and flips each chain that reaches a friendly cell, which is a more
/// permissive policy than the straight-line rule.
#[instrument(skip(grid), level = "debug")]
pub fn apply_capture_if_any(
    grid: &Grid,
    placed: Position,
    player: Player,
    adjacency: &AdjacencyConfig,
) -> Option<Vec<CellValue>> {
    let dirs = adjacency.enabled_directions();
    if dirs.is_empty() {
        return None;
    }
    match adjacency.mode {
        AdjacencyMode::Linear => capture_linear(grid, placed, player, &dirs),
        AdjacencyMode::Composite => capture_composite(grid, placed, player, &dirs),
    }
}

fn capture_linear(
    grid: &Grid,
    placed: Position,
    player: Player,
    dirs: &[Position],
) -> Option<Vec<CellValue>> {
    let opponent = player.opponent();
    let mut cells = grid.cells().to_vec();
    let mut captured = false;
    for dir in dirs {
        let mut run: Vec<usize> = Vec::new();
        let mut cursor = placed.step(*dir);
        while let Some(idx) = grid.index_of(cursor) {
            match cells[idx] {
                Some(p) if p == opponent => {
                    run.push(idx);
                    cursor = cursor.step(*dir);
                }
                Some(_) => {
                    // Friendly terminator closes the line.
                    for &i in &run {
                        cells[i] = Some(player);
                    }
                    captured |= !run.is_empty();
                    break;
                }
                None => break,
            }
        }
    }
    captured.then_some(cells)
}

fn capture_composite(
    grid: &Grid,
    placed: Position,
    player: Player,
    dirs: &[Position],
) -> Option<Vec<CellValue>> {
    let opponent = player.opponent();
    let mut flipped: HashSet<usize> = HashSet::new();
    for dir in dirs {
        let start = placed.step(*dir);
        if grid.get(start) != Some(opponent) {
            continue;
        }
        let mut stack: Vec<(Vec<Position>, Position)> = vec![(vec![start], start)];
        while let Some((path, at)) = stack.pop() {
            for next_dir in dirs {
                let next = at.step(*next_dir);
                match grid.get(next) {
                    Some(p) if p == opponent => {
                        if !path.contains(&next) {
                            let mut extended = path.clone();
                            extended.push(next);
                            stack.push((extended, next));
                        }
                    }
                    Some(_) => {
                        // Friendly cell closes the whole chain.
                        for pos in &path {
                            if let Some(idx) = grid.index_of(*pos) {
                                flipped.insert(idx);
                            }
                        }
                    }
                    None => {}
                }
            }
        }
    }
    if flipped.is_empty() {
        return None;
    }
    let mut cells = grid.cells().to_vec();
    for idx in flipped {
        cells[idx] = Some(player);
    }
    Some(cells)
}

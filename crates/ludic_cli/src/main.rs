//! Ludic - Unified CLI
//!
//! Tooling surface over the ludic_engine library: document validation,
//! preset discovery, schema export, and scripted replays.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use ludic_engine::{
    all_presets, create_initial_state, preset, reduce, search_presets, validate_document,
    validate_document_with_solver, Config, GameConfig, GameEvent, GameStatus, ImplicationSolver,
    InputMode, Position,
};
use std::path::PathBuf;
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { file, no_solver } => run_validate(file, no_solver),
        Command::Presets { query } => run_presets(query),
        Command::Schema => run_schema(),
        Command::Play { preset, moves } => run_play(preset, moves),
    }
}

/// Validate a configuration document and report every problem found.
#[instrument(skip_all, fields(file = %file.display()))]
fn run_validate(file: PathBuf, no_solver: bool) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
    let document: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))?;

    let result = if no_solver {
        validate_document(&document)
    } else {
        validate_document_with_solver(&document, &ImplicationSolver)
    };

    match result {
        Ok(validated) => {
            for warning in &validated.warnings {
                println!("warning: {warning}");
            }
            println!(
                "{}: ok ({}, v{})",
                file.display(),
                validated.config.metadata.name,
                validated.config.metadata.version
            );
            Ok(())
        }
        Err(report) => {
            for issue in &report.issues {
                println!("error: {issue}");
            }
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
            anyhow::bail!("{report}")
        }
    }
}

/// List the built-in presets, filtered when a query is given.
#[instrument]
fn run_presets(query: Option<String>) -> Result<()> {
    let presets = match &query {
        Some(query) => search_presets(query),
        None => all_presets().collect(),
    };
    debug!(count = presets.len(), "presets selected");

    if presets.is_empty() {
        println!("no presets match the query");
        return Ok(());
    }
    for preset in presets {
        println!("{}  ({})", preset.id, preset.name);
        println!("    {}", preset.description);
        println!("    tags: {}", preset.tags.join(", "));
    }
    Ok(())
}

/// Print the JSON Schema for configuration documents.
#[instrument]
fn run_schema() -> Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Replay a scripted game against a preset and print the final board.
#[instrument(skip(moves), fields(move_count = moves.len()))]
fn run_play(preset_id: String, moves: Vec<String>) -> Result<()> {
    let preset = preset(&preset_id)
        .with_context(|| format!("unknown preset \"{preset_id}\"; see `ludic presets`"))?;
    let config = GameConfig::from(&preset.config);

    let mut state = create_initial_state(&config);
    for (index, token) in moves.iter().enumerate() {
        let event = parse_move(token, config.input)
            .with_context(|| format!("move {} (\"{token}\")", index + 1))?;
        state = reduce(state, &event, &config);
    }

    println!("{}", state.grid);
    match state.status {
        GameStatus::Won => match state.winner {
            Some(winner) => println!("{winner} wins after {} moves", state.move_count),
            None => println!("won after {} moves", state.move_count),
        },
        GameStatus::Draw => println!("draw after {} moves", state.move_count),
        GameStatus::Playing => {
            println!("{} to move after {} moves", state.current_player, state.move_count)
        }
    }
    Ok(())
}

/// Parse one scripted move under the preset's input mode.
fn parse_move(token: &str, input: InputMode) -> Result<GameEvent> {
    if token.eq_ignore_ascii_case("reset") {
        return Ok(GameEvent::Reset);
    }
    match input {
        InputMode::Cell => {
            let (row, col) = token
                .split_once(',')
                .context("expected a `row,col` pair")?;
            Ok(GameEvent::Place {
                position: Position::new(row.trim().parse()?, col.trim().parse()?),
            })
        }
        InputMode::Column => Ok(GameEvent::ActivateColumn {
            col: token.trim().parse()?,
        }),
    }
}

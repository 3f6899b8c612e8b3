//! Command-line interface for ludic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ludic - Declarative board game rules engine
#[derive(Parser, Debug)]
#[command(name = "ludic")]
#[command(about = "Validate, inspect, and replay declarative board games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a configuration document
    Validate {
        /// Path to a JSON configuration file
        file: PathBuf,

        /// Skip the structural-constraint solver phase
        #[arg(long)]
        no_solver: bool,
    },

    /// List the built-in presets, optionally filtered
    Presets {
        /// Case-insensitive filter over names, tags, and descriptions
        query: Option<String>,
    },

    /// Print the JSON Schema for configuration documents
    Schema,

    /// Replay a scripted game against a preset and print the outcome
    Play {
        /// Preset id to play (see `ludic presets`)
        #[arg(short, long)]
        preset: String,

        /// Moves to apply in order: `row,col` under cell input, a lane
        /// index under column input, or `reset`
        #[arg(value_name = "MOVE", required = true)]
        moves: Vec<String>,
    },
}

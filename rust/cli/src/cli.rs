//! Command-line definitions parsed with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-Limit Texas Hold'em table engine",
    long_about = "Simulates bot matches, deals sample hands and evaluates card sets.\n\
                  Table settings come from the TOML file in HOLDEM_CONFIG and HOLDEM_* variables."
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a bot-only match until one player is left or the hand limit is hit
    Sim {
        /// Number of seats
        #[arg(long, default_value_t = 4)]
        players: usize,
        /// Bot kinds, comma separated and assigned to seats in turn
        #[arg(long, value_delimiter = ',', default_value = "baseline")]
        bots: Vec<String>,
        /// Stop after this many hands (overrides max_hands)
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Append one JSON hand record per line to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Per-turn action timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Evaluate the best hand in five to seven cards, e.g. `AH KH QH JH TH 2C 3D`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Print the hand as JSON
        #[arg(long)]
        json: bool,
    },
    /// Deal one hand and check it down to showdown
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Show the resolved table configuration and where each value came from
    Cfg,
}

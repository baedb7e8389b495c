//! # holdem CLI
//!
//! Command-line driver for the `holdem-engine` crate. It exists to exercise
//! the engine end to end: bot matches, single sample hands and hand
//! evaluation.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a subcommand and returns the
//! process exit code, writing to the given streams instead of the real
//! stdout/stderr:
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "eval", "AH KH QH JH TH"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().starts_with("Straight flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Play a bot-only match, optionally writing JSONL hand records
//! - `deal`: Deal one seeded hand and check it down
//! - `eval`: Evaluate five to seven cards
//! - `cfg`: Display the resolved table configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command, SimOptions,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "deal", "eval", "cfg"];

/// Parses `args` and runs the chosen command.
///
/// Returns [`exit_code::SUCCESS`] on success (including `--help` and
/// `--version`, which go to `out`), [`exit_code::INTERRUPTED`] when a
/// simulation is stopped with Ctrl+C and [`exit_code::ERROR`] otherwise.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            players,
            bots,
            hands,
            seed,
            output,
            timeout_ms,
        } => handle_sim_command(
            SimOptions {
                players,
                bots,
                hands,
                seed,
                output,
                timeout_ms,
            },
            out,
            err,
        ),
        Commands::Eval { cards, json } => handle_eval_command(&cards, json, out),
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        // cfg reports its own failures on stderr
        Commands::Cfg => {
            return match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(_) => exit_code::ERROR,
            };
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            match e {
                CliError::Interrupted(_) => exit_code::INTERRUPTED,
                _ => exit_code::ERROR,
            }
        }
    }
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err);
    let _ = writeln!(err, "Hold'em table CLI");
    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}

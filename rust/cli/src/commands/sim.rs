//! Bot-only match simulation.
//!
//! Seats one bot per player, hands the table to a [`Dealer`] on a tokio
//! runtime and lets the bots answer its `AwaitingAction` events over the
//! action channel. Hand records are appended to `--output` as JSONL.

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::{create_bot, Bot, BOT_KINDS};
use holdem_engine::dealer::{Dealer, MatchResult};
use holdem_engine::events::{EventSubscription, GameEvent};
use holdem_engine::game::Game;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::{Action, ActionKind};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Options of the `sim` command after clap parsing.
#[derive(Debug, Clone)]
pub struct SimOptions {
    pub players: usize,
    pub bots: Vec<String>,
    pub hands: Option<u32>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
}

pub fn handle_sim_command(
    opts: SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut table = config::load()?;
    if let Some(seed) = opts.seed {
        table.seed = Some(seed);
    }
    if let Some(hands) = opts.hands {
        table.max_hands = Some(hands);
    }
    if let Some(ms) = opts.timeout_ms {
        table.action_timeout_ms = Some(ms);
    }
    table.validate()?;
    table.validate_seats(opts.players)?;
    let seed = *table.seed.get_or_insert_with(rand::random);

    if opts.bots.len() > opts.players {
        ui::display_warning(
            err,
            &format!(
                "{} bot kinds for {} seats; the extra kinds are unused",
                opts.bots.len(),
                opts.players
            ),
        )?;
    }
    let seats = seat_bots(&opts.bots, opts.players, seed)?;
    let game = Game::from_config(seats.iter().map(|(name, _)| name.clone()), &table)?;
    let logger = opts.output.as_ref().map(HandLogger::create).transpose()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let (result, hands_played) = runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(16);
        let mut dealer = Dealer::new(game, table, rx);
        if let Some(logger) = logger {
            dealer = dealer.with_logger(logger);
        }
        let bots = tokio::spawn(drive_bots(dealer.subscribe(), seats.into_iter().collect(), tx));

        let finished = tokio::select! {
            result = dealer.run() => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };
        bots.abort();
        let played = dealer.game().hand_number();
        (finished, played)
    });

    let Some(result) = result else {
        return Err(CliError::Interrupted(format!(
            "stopped during hand {}",
            hands_played
        )));
    };
    let result = result?;

    writeln!(out, "Seed: {}", seed)?;
    write_summary(out, &result)?;
    if let Some(path) = &opts.output {
        writeln!(out, "Hand records: {}", path.display())?;
    }
    Ok(())
}

/// Names each seat after its bot kind, cycling through `kinds`.
fn seat_bots(
    kinds: &[String],
    players: usize,
    seed: u64,
) -> Result<Vec<(String, Box<dyn Bot>)>, CliError> {
    if kinds.is_empty() {
        return Err(CliError::InvalidInput("at least one bot kind is required".into()));
    }
    (0..players)
        .map(|seat| {
            let kind = kinds[seat % kinds.len()].trim().to_ascii_lowercase();
            let bot = create_bot(&kind, seed.wrapping_add(seat as u64)).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "unknown bot '{}' (expected one of: {})",
                    kind,
                    BOT_KINDS.join(", ")
                ))
            })?;
            Ok((format!("{}-{}", kind, seat + 1), bot))
        })
        .collect()
}

/// Answers every `AwaitingAction` addressed to a seated bot. A rejected bot
/// action is retried as check/call, which the rules always accept.
async fn drive_bots(
    mut events: EventSubscription,
    bots: HashMap<String, Box<dyn Bot>>,
    actions: mpsc::Sender<Action>,
) {
    while let Some(event) = events.recv().await {
        let action = match event {
            GameEvent::AwaitingAction {
                seat,
                player,
                snapshot,
                ..
            } => {
                let Some(bot) = bots.get(&player) else { continue };
                let kind = bot.decide(&snapshot.redacted_for(&player), seat);
                Action::new(player, kind)
            }
            GameEvent::ActionRejected { player, reason, .. } if bots.contains_key(&player) => {
                warn!(player = %player, reason = %reason, "bot action rejected, calling instead");
                Action::new(player, ActionKind::CheckCall)
            }
            _ => continue,
        };
        if actions.send(action).await.is_err() {
            break;
        }
    }
}

fn write_summary(out: &mut dyn Write, result: &MatchResult) -> Result<(), CliError> {
    info!(hands = result.hands_played, winner = ?result.winner, "simulation finished");
    writeln!(out, "Simulated: {} hands", result.hands_played)?;
    match &result.winner {
        Some(winner) => writeln!(out, "Winner: {}", winner)?,
        None => writeln!(out, "Winner: none (hand limit reached)")?,
    }
    writeln!(out, "Standings:")?;
    for standing in &result.standings {
        writeln!(out, "  {:<16} {:>8}", standing.player, standing.cash)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_kinds_cycle_over_seats() {
        let kinds = vec!["baseline".to_string(), "Random".to_string()];
        let seats = seat_bots(&kinds, 3, 7).unwrap();
        let names: Vec<&str> = seats.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["baseline-1", "random-2", "baseline-3"]);
        assert_eq!(seats[1].1.name(), "RandomBot");
    }

    #[test]
    fn unknown_bot_kind_lists_the_known_ones() {
        let kinds = vec!["oracle".to_string()];
        match seat_bots(&kinds, 2, 0) {
            Err(CliError::InvalidInput(msg)) => assert!(msg.contains("baseline, calling, random")),
            other => panic!("expected invalid input, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn summary_lists_standings() {
        let result = MatchResult {
            winner: None,
            hands_played: 3,
            standings: vec![holdem_engine::dealer::Standing {
                player: "baseline-1".into(),
                cash: 1200,
            }],
        };
        let mut out = Vec::new();
        write_summary(&mut out, &result).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("Simulated: 3 hands"));
        assert!(s.contains("hand limit reached"));
        assert!(s.contains("baseline-1"));
    }
}

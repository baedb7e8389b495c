//! Deal command: one seeded hand, checked down to showdown.
//!
//! Every player checks or calls, so the output always shows the whole board
//! and who would have won it. The same seed always deals the same hand.

use crate::error::CliError;
use holdem_engine::cards::Card;
use holdem_engine::game::{Game, HandStatus};
use holdem_engine::player::ActionKind;
use holdem_engine::pot::HandResult;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;

const DEAL_SMALL_BLIND: u32 = 10;

pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let names: Vec<String> = (1..=players).map(|i| format!("P{}", i)).collect();
    let mut game = Game::new(names, DEAL_SMALL_BLIND)?;
    let mut rng = ChaCha20Rng::seed_from_u64(base_seed);

    let mut progress = game.start_hand(&mut rng)?;
    let holes: Vec<(String, Option<[Card; 2]>)> = game
        .players()
        .iter()
        .map(|p| (p.name().to_string(), p.hole_cards()))
        .collect();

    let result = loop {
        match progress.status {
            HandStatus::AwaitingAction { seat } => {
                progress = game.apply_action(seat, ActionKind::CheckCall)?.progress;
            }
            HandStatus::Complete(result) => break result,
        }
    };

    for (name, hole) in &holes {
        let [a, b] = hole.ok_or_else(|| CliError::Engine(format!("{} was dealt no cards", name)))?;
        writeln!(out, "Hole {}: {} {}", name, a, b)?;
    }
    writeln!(out, "Board: {}", join_cards(&result.board))?;
    writeln!(out, "{}", describe_winners(&result))?;
    Ok(())
}

fn join_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::notation).collect::<Vec<_>>().join(" ")
}

fn describe_winners(result: &HandResult) -> String {
    let hand = result
        .shown
        .iter()
        .find(|s| result.winners.first() == Some(&s.player))
        .map(|s| s.hand.to_string())
        .unwrap_or_else(|| "uncontested".to_string());
    match result.winners.as_slice() {
        [one] => format!("Winner: {} ({})", one, hand),
        many => format!("Split: {} ({})", many.join(", "), hand),
    }
}

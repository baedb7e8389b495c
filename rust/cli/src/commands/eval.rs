//! Hand evaluation command.
//!
//! Evaluates the best five-card hand among five to seven cards given in
//! two-character notation (`AH`, `td`, ...), separated by spaces or commas.

use crate::error::CliError;
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::hand::evaluate;
use std::collections::HashSet;
use std::io::Write;

pub fn handle_eval_command(cards: &[String], json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_card_args(cards)?;
    let hand = evaluate(&cards);

    if json {
        let display = serde_json::json!({
            "cards": cards.iter().map(Card::notation).collect::<Vec<_>>(),
            "hand": hand,
            "description": hand.to_string(),
        });
        let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
    } else {
        writeln!(out, "{}", hand)?;
    }
    Ok(())
}

fn parse_card_args(args: &[String]) -> Result<Vec<Card>, CliError> {
    let cards = parse_cards(&args.join(" "))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("card {} appears twice", dup)));
    }
    Ok(cards)
}

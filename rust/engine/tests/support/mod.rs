#![allow(dead_code)]

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::deck::Deck;

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

pub fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

/// Deck that deals `holes[i]` to seat `(small_blind_seat + i) % n` and then
/// `board` (five cards), with burn cards taken from whatever is unused.
pub fn stacked_deck(holes: &[&str], board: &str) -> Deck {
    let holes: Vec<Vec<Card>> = holes.iter().map(|h| cards(h)).collect();
    let board = cards(board);
    assert_eq!(board.len(), 5, "board needs five cards");

    let used: Vec<Card> = holes.iter().flatten().chain(board.iter()).copied().collect();
    let mut burns = full_deck().into_iter().filter(|c| !used.contains(c));

    let mut order = Vec::new();
    for pass in 0..2 {
        for h in &holes {
            order.push(h[pass]);
        }
    }
    order.push(burns.next().unwrap());
    order.extend_from_slice(&board[..3]);
    order.push(burns.next().unwrap());
    order.push(board[3]);
    order.push(burns.next().unwrap());
    order.push(board[4]);
    Deck::stacked(&order)
}

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::Game;
use crate::hand::{evaluate_with_board, Hand};

/// Where the odd chips go when a pot does not split evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// One chip each to the winners closest to the left of the button
    #[default]
    ClosestToButton,
    /// The house keeps them
    House,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub player: String,
    pub amount: u32,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub player: String,
    pub hole_cards: [Card; 2],
    pub hand: Hand,
}

/// How a hand ended and who was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u32,
    pub pot: u32,
    /// False when everyone else folded
    pub showdown: bool,
    pub board: Vec<Card>,
    pub shown: Vec<ShownHand>,
    pub winners: Vec<String>,
    pub payouts: Vec<Payout>,
    /// Odd chips kept under [`RemainderPolicy::House`]
    pub house_share: u32,
}

/// Buffers reused across showdowns so settling a pot does not allocate per hand.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShowdownScratch {
    hands: Vec<Option<Hand>>,
    winners: Vec<usize>,
}

impl ShowdownScratch {
    pub(crate) fn with_seats(seats: usize) -> Self {
        Self {
            hands: Vec::with_capacity(seats),
            winners: Vec::with_capacity(seats),
        }
    }

    fn prepare(&mut self, seats: usize) {
        self.hands.clear();
        self.hands.resize(seats, None);
        self.winners.clear();
    }
}

/// Splits `pot` evenly across `winners`, which must already be ordered
/// starting left of the button. Returns each winner's share and the chips
/// left for the house.
///
/// ```
/// use holdem_engine::pot::{split_pot, RemainderPolicy};
///
/// let (shares, house) = split_pot(101, &[3, 1], RemainderPolicy::ClosestToButton);
/// assert_eq!(shares, vec![(3, 51), (1, 50)]);
/// assert_eq!(house, 0);
///
/// let (shares, house) = split_pot(101, &[3, 1], RemainderPolicy::House);
/// assert_eq!(shares, vec![(3, 50), (1, 50)]);
/// assert_eq!(house, 1);
/// ```
pub fn split_pot(pot: u32, winners: &[usize], policy: RemainderPolicy) -> (Vec<(usize, u32)>, u32) {
    if winners.is_empty() {
        return (Vec::new(), pot);
    }
    let count = winners.len() as u32;
    let share = pot / count;
    let mut remainder = pot % count;
    let shares = winners
        .iter()
        .map(|&seat| {
            let extra = match policy {
                RemainderPolicy::ClosestToButton if remainder > 0 => {
                    remainder -= 1;
                    1
                }
                _ => 0,
            };
            (seat, share + extra)
        })
        .collect();
    (shares, remainder)
}

/// Settles the hand at showdown: deals any missing board cards, evaluates
/// every live hand and pays the best one(s).
///
/// Falls back to [`award_uncontested`] when only one player is left.
///
/// # Panics
///
/// If a showdown with several live players produces no winner. That can only
/// follow from a broken game state and is not recoverable.
pub fn resolve_showdown(game: &mut Game) -> Result<HandResult, GameError> {
    if !game.in_hand {
        return Err(GameError::NoHandInProgress);
    }
    if game.live_count() <= 1 {
        return Ok(award_uncontested(game));
    }
    game.run_out_board()?;

    let seats = game.players.len();
    let mut scratch = std::mem::take(&mut game.scratch);
    scratch.prepare(seats);

    let mut shown = Vec::new();
    for (seat, p) in game.players.iter().enumerate() {
        if !p.is_live() {
            continue;
        }
        let Some(hole) = p.hole_cards() else { continue };
        let hand = evaluate_with_board(hole, &game.community);
        scratch.hands[seat] = Some(hand);
        shown.push(ShownHand {
            seat,
            player: p.name().to_string(),
            hole_cards: hole,
            hand,
        });
    }

    let best = scratch
        .hands
        .iter()
        .flatten()
        .max()
        .copied()
        .expect("showdown reached with no live hand to evaluate");

    let button = game.button_seat();
    let order = (1..=seats).map(|offset| (button + offset) % seats);
    scratch
        .winners
        .extend(order.filter(|&seat| scratch.hands[seat] == Some(best)));

    let pot = game.pot;
    let (shares, house_share) = split_pot(pot, &scratch.winners, game.remainder_policy);
    let result = pay_out(game, pot, true, shown, shares, house_share);
    game.scratch = scratch;

    info!(
        hand = result.hand_number,
        pot,
        winners = ?result.winners,
        best = %best,
        "showdown"
    );
    Ok(result)
}

/// Hands the whole pot to the only player who has not folded.
pub(crate) fn award_uncontested(game: &mut Game) -> HandResult {
    let pot = game.pot;
    let winner = game.players.iter().position(|p| p.is_live());
    let shares = winner.map(|seat| vec![(seat, pot)]).unwrap_or_default();
    let house_share = if winner.is_some() { 0 } else { pot };
    let result = pay_out(game, pot, false, Vec::new(), shares, house_share);
    info!(hand = result.hand_number, pot, winners = ?result.winners, "pot awarded uncontested");
    result
}

fn pay_out(
    game: &mut Game,
    pot: u32,
    showdown: bool,
    shown: Vec<ShownHand>,
    shares: Vec<(usize, u32)>,
    house_share: u32,
) -> HandResult {
    let mut payouts = Vec::with_capacity(shares.len());
    for (seat, amount) in shares {
        let player = &mut game.players[seat];
        player.add_chips(amount);
        payouts.push(Payout {
            seat,
            player: player.name().to_string(),
            amount,
        });
    }
    game.house += u64::from(house_share);
    game.pot = 0;
    game.end_hand();

    HandResult {
        hand_number: game.hand_number,
        pot,
        showdown,
        board: game.community.clone(),
        shown,
        winners: payouts.iter().map(|p| p.player.clone()).collect(),
        payouts,
        house_share,
    }
}

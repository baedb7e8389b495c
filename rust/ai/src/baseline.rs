//! Baseline bot: a deterministic, rule-based strategy.
//!
//! Preflop it rates the two hole cards on a 0-10 scale; after the flop it
//! rates the made hand. The rating, the amount to call and simple pot odds
//! decide between folding, calling and raising.

use crate::Bot;
use holdem_engine::cards::Card;
use holdem_engine::game::{GameSnapshot, Street};
use holdem_engine::hand::{evaluate_with_board, Category};
use holdem_engine::player::ActionKind;
use holdem_engine::rules::min_raise_to;

/// Simple rule-based bot used as the default simulation opponent.
///
/// **Preflop:** big pairs and big aces raise, medium hands call when cheap,
/// weak hands fold to a bet and check when free.
///
/// **Postflop:** two pair or better bets, one pair calls small bets, weaker
/// hands fold unless the price is very low.
///
/// ```rust
/// use holdem_ai::baseline::BaselineBot;
/// use holdem_ai::Bot;
/// use holdem_engine::game::Game;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let bot = BaselineBot::new();
/// let mut game = Game::new(["ann", "bob", "cat"], 10).unwrap();
/// game.start_hand(&mut ChaCha20Rng::seed_from_u64(42)).unwrap();
///
/// let seat = game.position().unwrap();
/// let action = bot.decide(&game.snapshot(), seat);
/// assert!(game.take_action(seat, action).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

/// Betting situation as seen by the acting seat.
#[derive(Debug, Clone, Copy)]
struct Spot {
    to_call: u32,
    current_bet: u32,
    min_raise_to: u32,
    stack: u32,
    pot: u32,
}

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Preflop strength on a 0-10 scale:
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, broadway cards)
    /// - 0-2: Weak hands (offsuit low cards)
    fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> u8 {
        let [c1, c2] = hole_cards;
        let r1 = c1.rank.value();
        let r2 = c2.rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Made-hand strength on a 0-10 scale, `None` before the flop.
    fn evaluate_postflop_strength(hole_cards: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let hand = evaluate_with_board(hole_cards, board);
        let base: u8 = match hand.category {
            Category::HighCard => 1,
            Category::Pair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let high_boost = u8::from(hand.high.value() >= 12);
        Some((base + high_boost).min(10))
    }

    /// Share of the final pot already in it: pot / (pot + call).
    fn calculate_pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn decide_action(strength: u8, spot: Spot) -> ActionKind {
        if spot.to_call == 0 {
            return Self::decide_unopened(strength, spot);
        }
        if spot.to_call >= spot.stack {
            return if strength >= 7 {
                ActionKind::AllIn
            } else {
                ActionKind::Fold
            };
        }

        let pot_odds = Self::calculate_pot_odds(spot.pot, spot.to_call);
        match strength {
            9..=10 => {
                let target = spot.current_bet + spot.pot / 2;
                ActionKind::Raise(target.max(spot.min_raise_to))
            }
            7..=8 => ActionKind::CheckCall,
            5..=6 if pot_odds >= 0.3 || spot.to_call <= spot.pot / 4 => ActionKind::CheckCall,
            3..=4 if pot_odds >= 0.4 || spot.to_call <= spot.pot / 6 => ActionKind::CheckCall,
            _ => ActionKind::Fold,
        }
    }

    /// Nothing to call: bet strong hands for value, check the rest.
    fn decide_unopened(strength: u8, spot: Spot) -> ActionKind {
        let bet = match strength {
            9..=10 => spot.pot * 2 / 3,
            7..=8 => spot.pot / 2,
            _ => return ActionKind::CheckCall,
        };
        ActionKind::Raise((spot.current_bet + bet).max(spot.min_raise_to))
    }
}

impl Bot for BaselineBot {
    fn decide(&self, view: &GameSnapshot, seat: usize) -> ActionKind {
        let Some(me) = view.players.get(seat) else {
            return ActionKind::Fold;
        };
        let to_call = view.to_call(seat);
        let Some(hole_cards) = me.hole_cards else {
            return if to_call == 0 {
                ActionKind::CheckCall
            } else {
                ActionKind::Fold
            };
        };

        let strength = match view.round {
            Street::Preflop => Self::evaluate_preflop_strength(hole_cards),
            _ => Self::evaluate_postflop_strength(hole_cards, &view.community)
                .unwrap_or_else(|| Self::evaluate_preflop_strength(hole_cards)),
        };
        let spot = Spot {
            to_call,
            current_bet: view.current_bet,
            min_raise_to: min_raise_to(view.current_bet, view.big_blind),
            stack: me.cash,
            pot: view.pot,
        };
        Self::decide_action(strength, spot)
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}

//! Trivial strategies for tests and load.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Bot;
use holdem_engine::game::GameSnapshot;
use holdem_engine::player::ActionKind;
use holdem_engine::rules::min_raise_to;

/// Checks or calls every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingBot;

impl Bot for CallingBot {
    fn decide(&self, _view: &GameSnapshot, _seat: usize) -> ActionKind {
        ActionKind::CheckCall
    }

    fn name(&self) -> &str {
        "CallingBot"
    }
}

/// Picks uniformly among fold, check/call, a minimum raise and all-in, but
/// never folds when checking is free. Seeded, so runs are reproducible.
#[derive(Debug)]
pub struct RandomBot {
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Bot for RandomBot {
    fn decide(&self, view: &GameSnapshot, seat: usize) -> ActionKind {
        let roll = match self.rng.lock() {
            Ok(mut rng) => rng.random_range(0..4u8),
            Err(poisoned) => poisoned.into_inner().random_range(0..4u8),
        };
        match roll {
            0 if view.to_call(seat) > 0 => ActionKind::Fold,
            2 => ActionKind::Raise(min_raise_to(view.current_bet, view.big_blind)),
            3 => ActionKind::AllIn,
            _ => ActionKind::CheckCall,
        }
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::game::Game;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn random_bot_is_reproducible_per_seed() {
        let mut game = Game::new(["ann", "bob"], 10).unwrap();
        game.start_hand(&mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let view = game.snapshot();
        let a = RandomBot::new(5);
        let b = RandomBot::new(5);
        let picks_a: Vec<_> = (0..16).map(|_| a.decide(&view, 0)).collect();
        let picks_b: Vec<_> = (0..16).map(|_| b.decide(&view, 0)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn random_bot_never_folds_for_free() {
        let game = Game::new(["ann", "bob"], 10).unwrap();
        let view = game.snapshot();
        let bot = RandomBot::new(9);
        assert!((0..64).all(|_| bot.decide(&view, 1) != ActionKind::Fold));
    }

    #[test]
    fn calling_bot_always_calls() {
        let game = Game::new(["ann", "bob"], 10).unwrap();
        assert_eq!(CallingBot.decide(&game.snapshot(), 0), ActionKind::CheckCall);
    }
}

//! # holdem-ai: bot players
//!
//! Bots are the action source used for simulations: they read the same
//! [`GameSnapshot`] every observer gets and answer with an [`ActionKind`].
//!
//! - [`Bot`] - Trait implemented by every strategy
//! - [`baseline`] - Rule-based bot using hand strength and pot odds
//! - [`simple`] - Calling-station and random bots, mostly for testing
//! - [`create_bot`] - Factory by name
//!
//! ```rust
//! use holdem_ai::{create_bot, Bot};
//! use holdem_engine::game::Game;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let bot = create_bot("baseline", 0).expect("known bot");
//! let mut game = Game::new(["ann", "bob"], 10).unwrap();
//! game.start_hand(&mut ChaCha20Rng::seed_from_u64(42)).unwrap();
//!
//! let seat = game.position().unwrap();
//! let view = game.snapshot().redacted_for(game.players()[seat].name());
//! let action = bot.decide(&view, seat);
//! println!("{} chose {}", bot.name(), action);
//! ```

use holdem_engine::game::GameSnapshot;
use holdem_engine::player::ActionKind;

pub mod baseline;
pub mod simple;

/// Names accepted by [`create_bot`].
pub const BOT_KINDS: &[&str] = &["baseline", "calling", "random"];

/// A strategy that picks an action for the seat whose turn it is.
///
/// `view` is normally redacted for the bot's own player, so only its own
/// hole cards are visible.
pub trait Bot: Send + Sync {
    fn decide(&self, view: &GameSnapshot, seat: usize) -> ActionKind;

    fn name(&self) -> &str;
}

/// Creates a bot by name; `seed` only matters for randomized bots.
///
/// ```rust
/// use holdem_ai::create_bot;
///
/// assert_eq!(create_bot("baseline", 0).unwrap().name(), "BaselineBot");
/// assert!(create_bot("oracle", 0).is_none());
/// ```
pub fn create_bot(kind: &str, seed: u64) -> Option<Box<dyn Bot>> {
    match kind {
        "baseline" => Some(Box::new(baseline::BaselineBot::new())),
        "calling" => Some(Box::new(simple::CallingBot)),
        "random" => Some(Box::new(simple::RandomBot::new(seed))),
        _ => None,
    }
}

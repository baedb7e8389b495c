//! # holdem-engine: Texas Hold'em table engine
//!
//! Deals and settles multi-player No-Limit Texas Hold'em hands: deck and
//! card model, seven-card evaluation, betting validation, pot splitting and
//! an async dealer that drives a table from a queue of player actions.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and notation parsing
//! - [`deck`] - 52-card deck shuffled with an injected RNG
//! - [`hand`] - Best-hand evaluation and comparison
//! - [`player`] - Seats, stacks and requested actions
//! - [`rules`] - Betting validation
//! - [`game`] - Table state, blinds and the synchronous hand lifecycle
//! - [`pot`] - Showdown resolution and pot splitting
//! - [`dealer`] - Async single-writer driver fed by an action channel
//! - [`events`] - Snapshots and events published to observers
//! - [`config`] - TOML table configuration
//! - [`logger`] - JSONL hand records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let cards: [_; 7] = parse_cards("AH KH QH JH TH 2C 3D").unwrap().try_into().unwrap();
//! let hand = evaluate_hand(&cards);
//! assert_eq!(hand.category, Category::StraightFlush);
//! ```
//!
//! ## Driving a table
//!
//! The [`dealer::Dealer`] owns the [`game::Game`]; players (bots, a UI, a
//! network layer) send [`player::Action`]s over an mpsc channel and watch
//! [`events::GameEvent`]s:
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::dealer::{Dealer, HandOutcome};
//! use holdem_engine::game::Game;
//! use holdem_engine::player::Action;
//! use tokio::sync::mpsc;
//!
//! # tokio_test_runtime(async {
//! let config = TableConfig { seed: Some(7), ..TableConfig::default() };
//! let game = Game::from_config(["ann", "bob"], &config).unwrap();
//! let (tx, rx) = mpsc::channel(8);
//! let mut dealer = Dealer::new(game, config, rx);
//!
//! // heads-up: the small blind acts first and folds
//! tx.send(Action::fold("ann")).await.unwrap();
//! let outcome = dealer.play_hand().await.unwrap();
//! assert!(matches!(outcome, HandOutcome::Played(r) if r.winners == ["bob"]));
//! # });
//! # fn tokio_test_runtime<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod cards;
pub mod config;
pub mod dealer;
pub mod deck;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;

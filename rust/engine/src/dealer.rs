//! Async orchestration: the [`Dealer`] owns a [`Game`], pulls actions from a
//! channel and tells observers what happened.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::errors::{DealerError, GameError};
use crate::events::{EventBus, EventSubscription, GameEvent};
use crate::game::{ActionOutcome, Game, HandStatus, Progress, Street};
use crate::logger::{ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use crate::player::{Action, ActionKind};
use crate::pot::HandResult;
use crate::rules::min_raise_to;

/// What [`Dealer::play_hand`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOutcome {
    Played(HandResult),
    /// Only one player was left before a hand could start
    MatchOver { winner: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub cash: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// `None` when `max_hands` ran out with several players left
    pub winner: Option<String>,
    pub hands_played: u32,
    /// Remaining players, richest first
    pub standings: Vec<Standing>,
}

/// Single writer of a [`Game`].
///
/// Actions arrive on an mpsc channel and are consumed one at a time; the
/// dealer only waits while the player at the current position owes a
/// decision. Actions from anyone else, and actions the rules refuse, are
/// reported as [`GameEvent::ActionRejected`] and the dealer keeps waiting.
pub struct Dealer<R: Rng = ChaCha20Rng> {
    game: Game,
    config: TableConfig,
    actions: mpsc::Receiver<Action>,
    rng: R,
    events: EventBus,
    logger: Option<HandLogger>,
}

impl Dealer<ChaCha20Rng> {
    /// Builds a dealer whose deck RNG is seeded from `config.seed`, or from
    /// the thread RNG when no seed is set.
    pub fn new(game: Game, config: TableConfig, actions: mpsc::Receiver<Action>) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(game, config, actions, rng)
    }
}

impl<R: Rng> Dealer<R> {
    pub fn with_rng(
        game: Game,
        mut config: TableConfig,
        actions: mpsc::Receiver<Action>,
        rng: R,
    ) -> Self {
        // the blind schedule starts from whatever the table opened with
        config.small_blind = game.small_blind();
        Self {
            game,
            config,
            actions,
            rng,
            events: EventBus::new(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: HandLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.events.subscribe()
    }

    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    /// Plays hands until one player is left (or `max_hands` is reached).
    pub async fn run(&mut self) -> Result<MatchResult, DealerError> {
        let mut hands_played = 0;
        loop {
            if let Some(max) = self.config.max_hands {
                if hands_played >= max {
                    info!(hands_played, "hand limit reached");
                    return Ok(self.match_result(None, hands_played));
                }
            }
            match self.play_hand().await? {
                HandOutcome::Played(_) => hands_played += 1,
                HandOutcome::MatchOver { winner } => {
                    return Ok(self.match_result(Some(winner), hands_played));
                }
            }
        }
    }

    /// Runs between-hand housekeeping, then plays one hand to completion.
    pub async fn play_hand(&mut self) -> Result<HandOutcome, DealerError> {
        if let Some(winner) = self.between_hands()? {
            return Ok(HandOutcome::MatchOver { winner });
        }

        let players: Vec<String> = self.game.players().iter().map(|p| p.name().to_string()).collect();
        let small_blind = self.game.small_blind();
        let mut progress = self.game.start_hand(&mut self.rng)?;
        let hand_id = self.logger.as_mut().map(HandLogger::next_id);
        let mut actions = Vec::new();

        let small_blind_seat = self.game.blind_index();
        let big_blind_seat = (small_blind_seat + 1) % players.len();
        self.publish(|snapshot| GameEvent::HandStarted {
            hand_number: snapshot.hand_number,
            small_blind_seat,
            big_blind_seat,
            snapshot,
        });

        loop {
            self.publish_streets(&progress.streets_dealt);
            match progress.status {
                HandStatus::AwaitingAction { seat } => {
                    progress = self.run_turn(seat, &mut actions).await?;
                }
                HandStatus::Complete(result) => {
                    info!(
                        hand = result.hand_number,
                        pot = result.pot,
                        winners = ?result.winners,
                        showdown = result.showdown,
                        "hand finished"
                    );
                    self.publish(|snapshot| GameEvent::HandFinished {
                        result: result.clone(),
                        snapshot,
                    });
                    if let (Some(logger), Some(hand_id)) = (self.logger.as_mut(), hand_id) {
                        logger.write(&HandRecord {
                            hand_id,
                            hand_number: result.hand_number,
                            seed: self.config.seed,
                            small_blind,
                            players,
                            actions,
                            board: result.board.clone(),
                            pot: result.pot,
                            ts: None,
                            showdown: Some(ShowdownInfo::from_result(&result)),
                        })?;
                    }
                    return Ok(HandOutcome::Played(result));
                }
            }
        }
    }

    /// Eliminations and the blind schedule. Returns the winner once a single
    /// player is left.
    fn between_hands(&mut self) -> Result<Option<String>, DealerError> {
        let removed = self.game.eliminate_below(self.game.big_blind())?;
        for player in removed {
            self.publish(|snapshot| GameEvent::PlayerEliminated {
                player: player.name().to_string(),
                cash: player.cash(),
                snapshot,
            });
        }

        if let [last] = self.game.players() {
            let winner = last.name().to_string();
            let hands_played = self.game.hand_number();
            info!(winner = %winner, hands_played, "match won");
            self.publish(|snapshot| GameEvent::MatchWon {
                winner: winner.clone(),
                hands_played,
                snapshot,
            });
            return Ok(Some(winner));
        }

        let scheduled = self.config.small_blind_for_hand(self.game.hand_number() + 1);
        if scheduled > self.game.small_blind() {
            self.game.set_small_blind(scheduled)?;
            info!(small_blind = scheduled, big_blind = self.game.big_blind(), "blinds increased");
            self.publish(|snapshot| GameEvent::BlindsIncreased {
                small_blind: snapshot.small_blind,
                big_blind: snapshot.big_blind,
                snapshot,
            });
        }
        Ok(None)
    }

    /// Waits for the player at `seat` and applies their action.
    async fn run_turn(
        &mut self,
        seat: usize,
        actions: &mut Vec<ActionRecord>,
    ) -> Result<Progress, DealerError> {
        let name = self.game.players()[seat].name().to_string();
        let to_call = self.game.to_call(seat);
        self.publish(|snapshot| GameEvent::AwaitingAction {
            seat,
            player: name.clone(),
            to_call,
            min_raise_to: min_raise_to(snapshot.current_bet, snapshot.big_blind),
            snapshot,
        });

        // rejected actions do not extend the turn
        let deadline = self.config.action_timeout().map(|limit| Instant::now() + limit);
        loop {
            let received = match deadline {
                Some(at) => match timeout_at(at, self.actions.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        let kind = if to_call == 0 {
                            ActionKind::CheckCall
                        } else {
                            ActionKind::Fold
                        };
                        warn!(player = %name, action = %kind, "action timed out");
                        let outcome = self.game.apply_action(seat, kind)?;
                        self.record(&name, &outcome, true, actions);
                        return Ok(outcome.progress);
                    }
                },
                None => self.actions.recv().await,
            };

            let Some(action) = received else {
                let refunded = self.game.abort_hand();
                warn!(refunded, "action source closed; hand aborted");
                return Err(DealerError::ActionSourceClosed);
            };

            if action.player != name {
                let err = match self.game.seat_of(&action.player) {
                    Some(actual) => GameError::OutOfTurn {
                        expected: seat,
                        actual,
                    },
                    None => GameError::UnknownPlayer(action.player.clone()),
                };
                self.reject(&action.player, &err);
                continue;
            }

            match self.game.apply_action(seat, action.kind) {
                Ok(outcome) => {
                    self.record(&name, &outcome, false, actions);
                    return Ok(outcome.progress);
                }
                Err(err) => self.reject(&action.player, &err),
            }
        }
    }

    fn record(
        &self,
        name: &str,
        outcome: &ActionOutcome,
        timed_out: bool,
        actions: &mut Vec<ActionRecord>,
    ) {
        debug!(player = name, street = ?outcome.street, action = ?outcome.applied, timed_out, "action");
        actions.push(ActionRecord {
            player: name.to_string(),
            street: outcome.street,
            action: outcome.applied,
            timed_out,
        });
        self.publish(|snapshot| GameEvent::ActionApplied {
            player: name.to_string(),
            street: outcome.street,
            action: outcome.applied,
            timed_out,
            snapshot,
        });
    }

    fn reject(&self, player: &str, err: &GameError) {
        warn!(player, error = %err, "action rejected");
        self.publish(|snapshot| GameEvent::ActionRejected {
            player: player.to_string(),
            reason: err.to_string(),
            snapshot,
        });
    }

    fn publish_streets(&self, streets: &[Street]) {
        for &street in streets {
            let board = self.game.community()[..street.board_len()].to_vec();
            self.publish(|snapshot| GameEvent::StreetDealt {
                street,
                board,
                snapshot,
            });
        }
    }

    fn publish(&self, build: impl FnOnce(crate::game::GameSnapshot) -> GameEvent) {
        if self.events.subscriber_count() == 0 {
            return;
        }
        self.events.publish(build(self.game.snapshot()));
    }

    fn match_result(&self, winner: Option<String>, hands_played: u32) -> MatchResult {
        let mut standings: Vec<Standing> = self
            .game
            .players()
            .iter()
            .map(|p| Standing {
                player: p.name().to_string(),
                cash: p.cash(),
            })
            .collect();
        standings.sort_by(|a, b| b.cash.cmp(&a.cash));
        MatchResult {
            winner,
            hands_played,
            standings,
        }
    }
}

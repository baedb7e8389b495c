use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{ActionKind, Player, STARTING_STACK};
use crate::pot::{self, HandResult, RemainderPolicy, ShowdownScratch};
use crate::rules::{validate_action, ValidatedAction};

pub const MIN_PLAYERS: usize = 2;
/// Two hole cards per seat plus five board cards and three burns must fit in 52 cards.
pub const MAX_PLAYERS: usize = 22;

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards visible once this street is dealt.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// Where a hand stands after the engine has processed an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandStatus {
    /// Waiting on the player in `seat`
    AwaitingAction { seat: usize },
    /// The pot has been awarded
    Complete(HandResult),
}

/// Streets dealt while settling, plus the resulting status. Several streets
/// can be dealt at once when nobody is left to bet (all-in run-outs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub streets_dealt: Vec<Street>,
    pub status: HandStatus,
}

/// Result of [`Game::apply_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub seat: usize,
    /// Street the action was taken on
    pub street: Street,
    pub applied: ValidatedAction,
    pub progress: Progress,
}

/// Full table state for one match: seats, board, pot, blinds and deck.
///
/// A `Game` has a single writer (normally the [`crate::dealer::Dealer`]).
/// Chips are conserved: `sum(cash) + pot + house + retired` always equals
/// the chips the game started with.
///
/// ```
/// use holdem_engine::game::{Game, HandStatus};
/// use holdem_engine::player::ActionKind;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut game = Game::new(["ann", "bob", "cat"], 10).unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(1);
/// let progress = game.start_hand(&mut rng).unwrap();
///
/// // seat 0 posts the small blind, seat 1 the big blind, seat 2 acts first
/// assert_eq!(progress.status, HandStatus::AwaitingAction { seat: 2 });
/// assert_eq!(game.pot(), 30);
///
/// game.apply_action(2, ActionKind::Fold).unwrap();
/// let outcome = game.apply_action(0, ActionKind::Fold).unwrap();
/// assert!(matches!(outcome.progress.status, HandStatus::Complete(_)));
/// assert_eq!(game.player(1).unwrap().cash(), 1010);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) community: Vec<Card>,
    pub(crate) round: Street,
    pub(crate) position: usize,
    pub(crate) blind_index: usize,
    pub(crate) current_bet: u32,
    pub(crate) pot: u32,
    pub(crate) small_blind: u32,
    pub(crate) deck: Deck,
    pub(crate) hand_number: u32,
    pub(crate) in_hand: bool,
    pub(crate) remainder_policy: RemainderPolicy,
    pub(crate) scratch: ShowdownScratch,
    total_chips: u64,
    /// Odd chips kept by the house under [`RemainderPolicy::House`]
    pub(crate) house: u64,
    /// Chips that left with eliminated players
    retired: u64,
}

impl Game {
    /// Seats one player per name with [`STARTING_STACK`] chips.
    pub fn new<I, S>(names: I, small_blind: u32) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stack(names, small_blind, STARTING_STACK)
    }

    pub fn with_stack<I, S>(names: I, small_blind: u32, starting_stack: u32) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players = names
            .into_iter()
            .map(|name| Player::new(name, starting_stack))
            .collect();
        Self::from_players(players, small_blind)
    }

    pub fn from_config<I, S>(names: I, config: &TableConfig) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut game = Self::with_stack(names, config.small_blind, config.starting_stack)?;
        game.remainder_policy = config.remainder_policy;
        Ok(game)
    }

    /// Seats pre-built players, keeping their stacks as given.
    pub fn from_players(players: Vec<Player>, small_blind: u32) -> Result<Self, GameError> {
        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                minimum: MIN_PLAYERS,
                actual: players.len(),
            });
        }
        if players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers {
                maximum: MAX_PLAYERS,
                actual: players.len(),
            });
        }
        if small_blind == 0 {
            return Err(GameError::InvalidBlind);
        }
        for (i, p) in players.iter().enumerate() {
            if p.cash() == 0 {
                return Err(GameError::InvalidStack(p.name().to_string()));
            }
            if players[..i].iter().any(|q| q.name() == p.name()) {
                return Err(GameError::DuplicatePlayer(p.name().to_string()));
            }
        }
        let total_chips: u64 = players.iter().map(|p| u64::from(p.cash())).sum();
        if total_chips > u64::from(u32::MAX) {
            return Err(GameError::TooManyChips {
                total: total_chips,
                maximum: u32::MAX,
            });
        }
        let seats = players.len();
        Ok(Self {
            community: Vec::with_capacity(5),
            round: Street::Preflop,
            position: 0,
            // first rotation lands the small blind on seat 0
            blind_index: seats - 1,
            current_bet: 0,
            pot: 0,
            small_blind,
            deck: Deck::new(),
            hand_number: 0,
            in_hand: false,
            remainder_policy: RemainderPolicy::default(),
            scratch: ShowdownScratch::with_seats(seats),
            total_chips,
            house: 0,
            retired: 0,
            players,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn round(&self) -> Street {
        self.round
    }
    /// Seat expected to act next, while a hand is in progress.
    pub fn position(&self) -> Option<usize> {
        self.in_hand.then_some(self.position)
    }
    /// Seat that posted (or will next post) the small blind.
    pub fn blind_index(&self) -> usize {
        self.blind_index
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn is_hand_in_progress(&self) -> bool {
        self.in_hand
    }
    pub fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }
    pub fn set_remainder_policy(&mut self, policy: RemainderPolicy) {
        self.remainder_policy = policy;
    }
    pub fn house(&self) -> u64 {
        self.house
    }
    pub fn retired_chips(&self) -> u64 {
        self.retired
    }
    pub fn total_chips(&self) -> u64 {
        self.total_chips
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// `sum(cash) + pot + house + retired`; equals [`Game::total_chips`] at all times.
    pub fn chips_accounted(&self) -> u64 {
        let stacks: u64 = self.players.iter().map(|p| u64::from(p.cash())).sum();
        stacks + u64::from(self.pot) + self.house + self.retired
    }

    /// Chips `seat` must add to match the current bet.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map_or(0, |p| self.current_bet.saturating_sub(p.bet_this_round()))
    }

    /// Dealer button: the seat before the small blind, or the small blind
    /// itself when heads-up.
    pub fn button_seat(&self) -> usize {
        let n = self.players.len();
        if n == 2 {
            self.blind_index
        } else {
            (self.blind_index + n - 1) % n
        }
    }

    /// Number of players who have not folded.
    pub fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    pub fn set_small_blind(&mut self, small_blind: u32) -> Result<(), GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        if small_blind == 0 {
            return Err(GameError::InvalidBlind);
        }
        self.small_blind = small_blind;
        Ok(())
    }

    /// Removes every player holding fewer than `threshold` chips, between hands.
    ///
    /// If nobody would be left, the richest player (earliest seat on ties)
    /// keeps their seat. The blind rotation continues with the next surviving
    /// player after the last small blind.
    pub fn eliminate_below(&mut self, threshold: u32) -> Result<Vec<Player>, GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        let mut keep: Vec<bool> = self.players.iter().map(|p| p.cash() >= threshold).collect();
        if !keep.contains(&true) {
            let richest = self
                .players
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, p)| p.cash())
                .map_or(0, |(i, _)| i);
            keep[richest] = true;
        }
        if keep.iter().all(|&k| k) {
            return Ok(Vec::new());
        }

        let survivors_up_to_blind = keep[..=self.blind_index].iter().filter(|&&k| k).count();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.players.len());
        for (player, k) in self.players.drain(..).zip(keep) {
            if k {
                kept.push(player);
            } else {
                self.retired += u64::from(player.cash());
                info!(player = player.name(), cash = player.cash(), "player eliminated");
                removed.push(player);
            }
        }
        self.players = kept;
        let n = self.players.len();
        self.blind_index = (survivors_up_to_blind + n - 1) % n;
        self.position = 0;
        Ok(removed)
    }

    /// Starts the next hand: rotates the blinds, posts them, shuffles with
    /// `rng` and deals two hole cards to every seat.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Progress, GameError> {
        let mut deck = std::mem::take(&mut self.deck);
        deck.reset();
        deck.shuffle(rng);
        self.start_hand_with_deck(deck)
    }

    /// Like [`Game::start_hand`] but deals from `deck` in its current order,
    /// e.g. a [`Deck::stacked`] deck when replaying a recorded hand.
    ///
    /// Hole cards go out one at a time starting at the small blind; each
    /// street is preceded by one burn card.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<Progress, GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        let n = self.players.len();
        if n < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                minimum: MIN_PLAYERS,
                actual: n,
            });
        }
        if deck.remaining() < 2 * n + 8 {
            return Err(GameError::DeckExhausted);
        }
        if let Some(broke) = self.players.iter().find(|p| p.cash() == 0) {
            return Err(GameError::InvalidStack(broke.name().to_string()));
        }

        self.hand_number += 1;
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.community.clear();
        self.round = Street::Preflop;
        self.blind_index = (self.blind_index + 1) % n;
        let sb_seat = self.blind_index;
        let bb_seat = (sb_seat + 1) % n;

        self.deck = deck;
        let mut holes: Vec<[Option<Card>; 2]> = vec![[None, None]; n];
        for pass in 0..2 {
            for i in 0..n {
                let seat = (sb_seat + i) % n;
                holes[seat][pass] = Some(self.deck.deal_card().ok_or(GameError::DeckExhausted)?);
            }
        }
        for (player, hole) in self.players.iter_mut().zip(holes) {
            if let [Some(a), Some(b)] = hole {
                player.deal([a, b]);
            }
        }

        let small = self.small_blind;
        let big = self.big_blind();
        self.pot += self.players[sb_seat].commit(small);
        self.pot += self.players[bb_seat].commit(big);
        self.current_bet = big;
        self.in_hand = true;

        info!(
            hand = self.hand_number,
            small_blind = self.players[sb_seat].name(),
            big_blind = self.players[bb_seat].name(),
            pot = self.pot,
            "hand started"
        );
        self.progress(bb_seat)
    }

    /// Validates and applies one action for the player at `seat`.
    ///
    /// This is the raw betting step: it never moves [`Game::position`], so
    /// callers pair it with [`Game::advance_position`] (or use
    /// [`Game::apply_action`], which also closes streets and settles the pot).
    /// On error nothing is changed.
    pub fn take_action(
        &mut self,
        seat: usize,
        kind: ActionKind,
    ) -> Result<ValidatedAction, GameError> {
        if !self.in_hand {
            return Err(GameError::NoHandInProgress);
        }
        if seat != self.position {
            return Err(GameError::OutOfTurn {
                expected: self.position,
                actual: seat,
            });
        }
        let player = &self.players[seat];
        let validated = validate_action(
            player.cash(),
            player.bet_this_round(),
            self.current_bet,
            self.big_blind(),
            kind,
        )?;
        self.apply_validated(seat, validated);
        Ok(validated)
    }

    /// Moves [`Game::position`] to the next player who still owes a decision
    /// on this street. Returns `None` (leaving the position alone) when the
    /// street is complete.
    pub fn advance_position(&mut self) -> Option<usize> {
        let next = self.next_to_act(self.position)?;
        self.position = next;
        Some(next)
    }

    /// Applies an action, then advances the turn, deals the next street or
    /// settles the hand as needed.
    pub fn apply_action(
        &mut self,
        seat: usize,
        kind: ActionKind,
    ) -> Result<ActionOutcome, GameError> {
        let street = self.round;
        let applied = self.take_action(seat, kind)?;
        debug!(
            hand = self.hand_number,
            player = self.players[seat].name(),
            street = ?street,
            action = ?applied,
            pot = self.pot,
            "action applied"
        );
        let progress = self.progress(seat)?;
        Ok(ActionOutcome {
            seat,
            street,
            applied,
            progress,
        })
    }

    /// True once no player owes a decision on this street, or at most one
    /// player is left in the hand.
    pub fn is_street_complete(&self) -> bool {
        self.live_count() <= 1 || (0..self.players.len()).all(|seat| !self.needs_action(seat))
    }

    /// Abandons the current hand and hands every player back what they put in.
    pub fn abort_hand(&mut self) -> u32 {
        if !self.in_hand {
            return 0;
        }
        let refunded: u32 = self.players.iter_mut().map(|p| p.refund()).sum();
        debug_assert_eq!(refunded, self.pot, "pot must equal the sum of contributions");
        self.pot = 0;
        self.end_hand();
        info!(hand = self.hand_number, refunded, "hand aborted");
        refunded
    }

    /// Immutable copy of the table for observers.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            hand_number: self.hand_number,
            round: self.round,
            community: self.community.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            small_blind: self.small_blind,
            big_blind: self.big_blind(),
            blind_index: self.blind_index,
            position: self.position(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name().to_string(),
                    cash: p.cash(),
                    bet_this_round: p.bet_this_round(),
                    committed: p.committed(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                    hole_cards: p.hole_cards(),
                })
                .collect(),
        }
    }

    pub(crate) fn end_hand(&mut self) {
        self.in_hand = false;
        self.current_bet = 0;
        for p in &mut self.players {
            p.reset_for_street();
        }
    }

    /// Deals any community cards still missing, without betting.
    pub(crate) fn run_out_board(&mut self) -> Result<Vec<Street>, GameError> {
        let mut dealt = Vec::new();
        while let Some(next) = self.round.next() {
            self.deal_street(next)?;
            dealt.push(next);
        }
        Ok(dealt)
    }

    fn apply_validated(&mut self, seat: usize, action: ValidatedAction) {
        let previous_bet = self.current_bet;
        let player = &mut self.players[seat];
        match action {
            ValidatedAction::Fold => player.fold(),
            ValidatedAction::Check => {}
            ValidatedAction::Call(n) | ValidatedAction::AllIn(n) => {
                self.pot += player.commit(n);
            }
            ValidatedAction::Raise { to, cost } => {
                self.pot += player.commit(cost);
                self.current_bet = to;
            }
        }
        player.mark_acted(true);
        self.current_bet = self.current_bet.max(player.bet_this_round());

        // a bigger bet reopens the action for everyone else still able to act
        if self.current_bet > previous_bet {
            for (i, p) in self.players.iter_mut().enumerate() {
                if i != seat && p.can_act() {
                    p.mark_acted(false);
                }
            }
        }
    }

    fn needs_action(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        if !p.can_act() {
            return false;
        }
        if p.bet_this_round() < self.current_bet {
            return true;
        }
        if p.has_acted() {
            return false;
        }
        // with nobody left to respond there is nothing to decide
        self.players
            .iter()
            .enumerate()
            .any(|(i, other)| i != seat && other.can_act())
    }

    fn next_to_act(&self, after: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (after + offset) % n)
            .find(|&seat| self.needs_action(seat))
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.deck.burn_card();
        while self.community.len() < street.board_len() {
            let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
            self.community.push(card);
        }
        self.round = street;
        debug!(hand = self.hand_number, street = ?street, board = ?self.community, "street dealt");
        Ok(())
    }

    /// Settles whatever follows the last event: passes the turn, deals
    /// streets nobody can bet on, and awards the pot when the hand is over.
    fn progress(&mut self, last_seat: usize) -> Result<Progress, GameError> {
        let mut streets_dealt = Vec::new();
        let mut after = last_seat;
        loop {
            if self.live_count() <= 1 {
                let result = pot::award_uncontested(self);
                return Ok(Progress {
                    streets_dealt,
                    status: HandStatus::Complete(result),
                });
            }
            if let Some(seat) = self.next_to_act(after) {
                self.position = seat;
                return Ok(Progress {
                    streets_dealt,
                    status: HandStatus::AwaitingAction { seat },
                });
            }
            match self.round.next() {
                Some(next) => {
                    self.deal_street(next)?;
                    streets_dealt.push(next);
                    after = self.button_seat();
                }
                None => {
                    let result = pot::resolve_showdown(self)?;
                    return Ok(Progress {
                        streets_dealt,
                        status: HandStatus::Complete(result),
                    });
                }
            }
        }
    }
}

/// Per-seat view inside a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub cash: u32,
    pub bet_this_round: u32,
    pub committed: u32,
    pub folded: bool,
    pub all_in: bool,
    pub hole_cards: Option<[Card; 2]>,
}

/// Immutable copy of a [`Game`] handed to observers after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub hand_number: u32,
    pub round: Street,
    pub community: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub blind_index: usize,
    /// Seat to act, `None` between hands
    pub position: Option<usize>,
    pub players: Vec<PlayerSnapshot>,
}

impl GameSnapshot {
    pub fn to_act(&self) -> Option<&PlayerSnapshot> {
        self.position.and_then(|seat| self.players.get(seat))
    }

    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map_or(0, |p| self.current_bet.saturating_sub(p.bet_this_round))
    }

    /// Copy with every hole card hidden except `viewer`'s.
    pub fn redacted_for(&self, viewer: &str) -> GameSnapshot {
        let mut view = self.clone();
        for p in &mut view.players {
            if p.name != viewer {
                p.hole_cards = None;
            }
        }
        view
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// What a player asks to do on their turn.
///
/// `Raise` carries the new total bet for the street, not the increment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Fold and forfeit the hand
    Fold,
    /// Check when nothing is owed, otherwise call the current bet
    CheckCall,
    /// Raise the street bet to the given total
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fold => write!(f, "fold"),
            ActionKind::CheckCall => write!(f, "check/call"),
            ActionKind::Raise(amount) => write!(f, "raise {}", amount),
            ActionKind::AllIn => write!(f, "allin"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = GameError;

    /// Parses `fold`, `check`, `call`, `raise <amount>` and `allin`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lowered = input.trim().to_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();
        match parts.as_slice() {
            ["fold" | "f"] => Ok(ActionKind::Fold),
            ["check" | "call" | "c"] => Ok(ActionKind::CheckCall),
            ["allin" | "all-in" | "shove"] => Ok(ActionKind::AllIn),
            ["raise" | "r", amount] => amount
                .parse::<u32>()
                .map(ActionKind::Raise)
                .map_err(|_| GameError::UnknownAction(input.trim().to_string())),
            _ => Err(GameError::UnknownAction(input.trim().to_string())),
        }
    }
}

/// An action record arriving from the outside world: who acts and what they do.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(player: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
        }
    }

    pub fn fold(player: impl Into<String>) -> Self {
        Self::new(player, ActionKind::Fold)
    }

    pub fn check_call(player: impl Into<String>) -> Self {
        Self::new(player, ActionKind::CheckCall)
    }

    pub fn raise(player: impl Into<String>, amount: u32) -> Self {
        Self::new(player, ActionKind::Raise(amount))
    }

    pub fn all_in(player: impl Into<String>) -> Self {
        Self::new(player, ActionKind::AllIn)
    }
}

/// A seated player: chip stack, hole cards, and per-hand betting flags.
/// Owned by [`crate::game::Game`]; only the betting engine and pot resolver
/// mutate it during a hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    name: String,
    cash: u32,
    hole_cards: Option<[Card; 2]>,
    folded: bool,
    all_in: bool,
    /// Chips put in on the current street
    bet_this_round: u32,
    /// Chips put in over the whole hand
    committed: u32,
    /// Has acted since the street's bet last went up
    acted: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, cash: u32) -> Self {
        Self {
            name: name.into(),
            cash,
            hole_cards: None,
            folded: false,
            all_in: false,
            bet_this_round: 0,
            committed: 0,
            acted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn cash(&self) -> u32 {
        self.cash
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole_cards
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn bet_this_round(&self) -> u32 {
        self.bet_this_round
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Still able to make betting decisions this hand.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole_cards = None;
        self.folded = false;
        self.all_in = false;
        self.bet_this_round = 0;
        self.committed = 0;
        self.acted = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.bet_this_round = 0;
        self.acted = false;
    }

    pub(crate) fn deal(&mut self, cards: [Card; 2]) {
        self.hole_cards = Some(cards);
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn mark_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    /// Moves up to `amount` chips from the stack into the current bet and
    /// returns what was actually moved. Emptying the stack marks the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.cash);
        self.cash -= paid;
        self.bet_this_round += paid;
        self.committed += paid;
        if self.cash == 0 {
            self.all_in = true;
        }
        paid
    }

    /// The table total fits in a `u32`, so a stack can never overflow.
    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.cash += amount;
    }

    /// Hands back everything committed this hand; used when a hand is aborted.
    pub(crate) fn refund(&mut self) -> u32 {
        let amount = self.committed;
        self.cash += amount;
        self.committed = 0;
        self.bet_this_round = 0;
        amount
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::ActionKind as A;

/// An action after it has been checked against the player's stack and the
/// table's current bet. Amounts are the chips that leave the player's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    /// New street bet `to`, costing `cost` chips from the stack
    Raise { to: u32, cost: u32 },
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves from the stack into the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::AllIn(n) => n,
            ValidatedAction::Raise { cost, .. } => cost,
        }
    }
}

/// Smallest legal raise target: double the current bet, never below the big blind.
pub fn min_raise_to(current_bet: u32, big_blind: u32) -> u32 {
    current_bet.saturating_mul(2).max(big_blind)
}

/// Validates a requested action according to betting rules and stack size.
///
/// Converts an [`A`] into a [`ValidatedAction`] without touching any state.
/// Calls and raises the player cannot cover become all-ins instead of errors.
///
/// # Arguments
///
/// * `stack` - Player's remaining chip stack
/// * `bet_this_round` - Chips the player already has in on this street
/// * `current_bet` - The street bet every live player must match
/// * `big_blind` - Floor for any raise target
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// [`GameError::RaiseTooSmall`] when an affordable raise targets less than
/// [`min_raise_to`].
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::ActionKind;
///
/// // Calling 40 more with plenty behind
/// let v = validate_action(1000, 10, 50, 20, ActionKind::CheckCall);
/// assert_eq!(v, Ok(ValidatedAction::Call(40)));
///
/// // Short stack facing a bet goes all-in instead
/// let v = validate_action(30, 10, 50, 20, ActionKind::CheckCall);
/// assert_eq!(v, Ok(ValidatedAction::AllIn(30)));
/// ```
///
/// ```
/// use holdem_engine::rules::validate_action;
/// use holdem_engine::player::ActionKind;
/// use holdem_engine::errors::GameError;
///
/// // Raising to 60 over a bet of 50 is below the 100 minimum
/// let v = validate_action(1000, 0, 50, 20, ActionKind::Raise(60));
/// assert_eq!(v, Err(GameError::RaiseTooSmall { amount: 60, minimum: 100 }));
/// ```
pub fn validate_action(
    stack: u32,
    bet_this_round: u32,
    current_bet: u32,
    big_blind: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::CheckCall => {
            let needed = current_bet.saturating_sub(bet_this_round);
            if needed == 0 {
                Ok(ValidatedAction::Check)
            } else if needed >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(needed))
            }
        }
        A::Raise(amount) => {
            let available = stack + bet_this_round;
            if available <= current_bet || amount >= available {
                return Ok(ValidatedAction::AllIn(stack));
            }
            let minimum = min_raise_to(current_bet, big_blind);
            if amount < minimum {
                Err(GameError::RaiseTooSmall { amount, minimum })
            } else {
                Ok(ValidatedAction::Raise {
                    to: amount,
                    cost: amount - bet_this_round,
                })
            }
        }
        A::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}

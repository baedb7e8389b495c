use thiserror::Error;

/// Input validation errors returned by the betting engine and game setup.
/// None of these mutate game state; callers are expected to re-prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    OutOfTurn { expected: usize, actual: usize },
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("Unknown action '{0}' (expected fold, check, call, raise <amount> or allin)")]
    UnknownAction(String),
    #[error("Unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("At least {minimum} players are required, got {actual}")]
    NotEnoughPlayers { minimum: usize, actual: usize },
    #[error("At most {maximum} players fit at the table, got {actual}")]
    TooManyPlayers { maximum: usize, actual: usize },
    #[error("Player name '{0}' is used more than once")]
    DuplicatePlayer(String),
    #[error("Small blind must be greater than zero")]
    InvalidBlind,
    #[error("Player '{0}' must start with a positive stack")]
    InvalidStack(String),
    #[error("The table would hold {total} chips, more than the {maximum} a pot can carry")]
    TooManyChips { total: u64, maximum: u32 },
    #[error("Deck exhausted")]
    DeckExhausted,
}

/// Errors produced when parsing card notation such as `"AC"` or `"Td"`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Card notation must be exactly 2 characters, got '{0}'")]
    InvalidLength(String),
    #[error("Unknown rank character '{0}'")]
    UnknownRank(char),
    #[error("Unknown suit character '{0}'")]
    UnknownSuit(char),
}

/// Errors raised while loading or validating a [`crate::config::TableConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that end a [`crate::dealer::Dealer`] run.
#[derive(Debug, Error)]
pub enum DealerError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Action source closed before the match finished")]
    ActionSourceClosed,
    #[error("Failed to write hand record: {0}")]
    Log(#[from] std::io::Error),
}

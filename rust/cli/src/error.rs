//! Error types for the CLI application.

use std::fmt;

use holdem_engine::errors::{CardParseError, ConfigError, DealerError, GameError};

/// Everything a command handler can fail with. Each variant maps to an exit
/// code in [`crate::run`].
#[derive(Debug)]
pub enum CliError {
    /// I/O error (hand-record files, stdout/stderr writes)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    Config(String),

    /// The engine refused the table setup or the match failed
    Engine(String),

    /// Operation was interrupted (Ctrl+C)
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<DealerError> for CliError {
    fn from(error: DealerError) -> Self {
        match error {
            DealerError::Log(e) => CliError::Io(e),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<CardParseError> for CliError {
    fn from(error: CardParseError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealer_log_failures_stay_io_errors() {
        let err: CliError = DealerError::Log(std::io::Error::other("disk full")).into();
        assert!(matches!(err, CliError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_carries_the_engine_message() {
        let err: CliError = GameError::NotEnoughPlayers { minimum: 2, actual: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Engine error: At least 2 players are required, got 1"
        );
    }

    #[test]
    fn card_errors_are_input_errors() {
        let err: CliError = CardParseError::UnknownRank('Z').into();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}

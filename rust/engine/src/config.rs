use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::player::STARTING_STACK;
use crate::pot::RemainderPolicy;

/// Table settings for a match. Every field has a default, so a TOML file
/// only needs the keys it changes:
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::from_toml_str("small_blind = 25\nhands_per_level = 5").unwrap();
/// assert_eq!(cfg.big_blind(), 50);
/// assert_eq!(cfg.starting_stack, 1000);
/// assert!(cfg.action_timeout().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    /// Hands between blind increases; 0 keeps the blinds fixed
    pub hands_per_level: u32,
    pub blind_increment: u32,
    /// Per-turn limit for the action source, in milliseconds
    pub action_timeout_ms: Option<u64>,
    pub remainder_policy: RemainderPolicy,
    pub seed: Option<u64>,
    /// Stop after this many hands even if several players remain
    pub max_hands: Option<u32>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            small_blind: 10,
            hands_per_level: 10,
            blind_increment: 10,
            action_timeout_ms: None,
            remainder_policy: RemainderPolicy::ClosestToButton,
            seed: None,
            max_hands: None,
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::Invalid("small_blind must be >0".into()));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be >0".into()));
        }
        if self.starting_stack < self.big_blind() {
            return Err(ConfigError::Invalid(format!(
                "starting_stack {} cannot cover the big blind {}",
                self.starting_stack,
                self.big_blind()
            )));
        }
        if self.action_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("action_timeout_ms must be >0".into()));
        }
        if self.max_hands == Some(0) {
            return Err(ConfigError::Invalid("max_hands must be >0".into()));
        }
        Ok(())
    }

    /// Checks that `seats` starting stacks fit in a single pot.
    pub fn validate_seats(&self, seats: usize) -> Result<(), ConfigError> {
        let total = u64::from(self.starting_stack) * seats as u64;
        if total > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "{} seats of {} chips exceed the {} chip table limit",
                seats,
                self.starting_stack,
                u32::MAX
            )));
        }
        Ok(())
    }

    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }

    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_ms.map(Duration::from_millis)
    }

    /// Small blind in effect for the given 1-based hand number.
    pub fn small_blind_for_hand(&self, hand_number: u32) -> u32 {
        if self.hands_per_level == 0 || hand_number == 0 {
            return self.small_blind;
        }
        let level = (hand_number - 1) / self.hands_per_level;
        self.small_blind
            .saturating_add(self.blind_increment.saturating_mul(level))
    }
}

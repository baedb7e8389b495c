//! Table configuration as seen by the CLI: defaults, then the TOML file named
//! by `HOLDEM_CONFIG`, then `HOLDEM_*` environment overrides. Every value
//! remembers where it came from so `holdem cfg` can report it.

use serde::{Deserialize, Serialize};
use std::fs;

use holdem_engine::config::TableConfig;
use holdem_engine::errors::ConfigError;
use holdem_engine::pot::RemainderPolicy;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const SMALL_BLIND_ENV: &str = "HOLDEM_SMALL_BLIND";
pub const STARTING_STACK_ENV: &str = "HOLDEM_STARTING_STACK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub hands_per_level: ValueSource,
    pub blind_increment: ValueSource,
    pub action_timeout_ms: ValueSource,
    pub remainder_policy: ValueSource,
    pub seed: ValueSource,
    pub max_hands: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            hands_per_level: ValueSource::Default,
            blind_increment: ValueSource::Default,
            action_timeout_ms: ValueSource::Default,
            remainder_policy: ValueSource::Default,
            seed: ValueSource::Default,
            max_hands: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: TableConfig,
    pub sources: ConfigSources,
}

/// Same keys as [`TableConfig`], all optional, so file values can be told
/// apart from defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    starting_stack: Option<u32>,
    small_blind: Option<u32>,
    hands_per_level: Option<u32>,
    blind_increment: Option<u32>,
    action_timeout_ms: Option<u64>,
    remainder_policy: Option<RemainderPolicy>,
    seed: Option<u64>,
    max_hands: Option<u32>,
}

pub fn load() -> Result<TableConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = TableConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(seed) = env_value(SEED_ENV, "seed")? {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    if let Some(blind) = env_value(SMALL_BLIND_ENV, "small_blind")? {
        cfg.small_blind = blind;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(stack) = env_value(STARTING_STACK_ENV, "starting_stack")? {
        cfg.starting_stack = stack;
        sources.starting_stack = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn apply_file(cfg: &mut TableConfig, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.starting_stack {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::File;
    }
    if let Some(v) = f.small_blind {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::File;
    }
    if let Some(v) = f.hands_per_level {
        cfg.hands_per_level = v;
        sources.hands_per_level = ValueSource::File;
    }
    if let Some(v) = f.blind_increment {
        cfg.blind_increment = v;
        sources.blind_increment = ValueSource::File;
    }
    if let Some(v) = f.action_timeout_ms {
        cfg.action_timeout_ms = Some(v);
        sources.action_timeout_ms = ValueSource::File;
    }
    if let Some(v) = f.remainder_policy {
        cfg.remainder_policy = v;
        sources.remainder_policy = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.max_hands {
        cfg.max_hands = Some(v);
        sources.max_hands = ValueSource::File;
    }
}

/// Empty variables count as unset.
fn env_value<T: std::str::FromStr>(key: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{} must be a number, got '{}'", what, raw))),
        _ => Ok(None),
    }
}

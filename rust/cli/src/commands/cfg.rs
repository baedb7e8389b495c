//! Configuration command handler.
//!
//! Prints the resolved table configuration as JSON, each key paired with
//! the place its value came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "small_blind": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind(),
            "source": sources.small_blind,
        },
        "hands_per_level": {
            "value": config.hands_per_level,
            "source": sources.hands_per_level,
        },
        "blind_increment": {
            "value": config.blind_increment,
            "source": sources.blind_increment,
        },
        "action_timeout_ms": {
            "value": config.action_timeout_ms,
            "source": sources.action_timeout_ms,
        },
        "remainder_policy": {
            "value": config.remainder_policy,
            "source": sources.remainder_policy,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "max_hands": {
            "value": config.max_hands,
            "source": sources.max_hands,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the current
//! twentyone configuration settings with their sources (default,
//! environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "decks": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   "penetration": {
//!     "value": 0.75,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the current configuration with source tracking and displays it
/// as formatted JSON to the output stream.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "decks": {
            "value": config.decks,
            "source": sources.decks,
        },
        "penetration": {
            "value": config.penetration,
            "source": sources.penetration,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "hit_soft_17": {
            "value": config.hit_soft_17,
            "source": sources.hit_soft_17,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

//! Simulation command handler.
//!
//! Runs a configured number of blackjack rounds with one strategy per
//! seat and reports the final profit-per-dollar for each, optionally
//! recording every round as JSONL for offline analysis.
//!
//! Shoe parameters come from the layered configuration
//! (defaults < file < environment) and can be overridden per invocation
//! with command-line flags.

use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use std::io::Write;
use twentyone_engine::engine::Game;
use twentyone_engine::logger::JsonlSink;
use twentyone_engine::rules::StandardRules;
use twentyone_strategies::create_strategy;

/// Handle the sim command: play `rounds` rounds and print per-seat
/// results.
///
/// # Arguments
///
/// * `rounds` - Number of rounds to play (must be >= 1)
/// * `seats` - Comma-separated strategy specs, seated in order from seat 1
/// * `decks` - Shoe size override in decks
/// * `penetration` - Reshuffle threshold override in (0, 1]
/// * `seed` - RNG seed override (random when absent everywhere)
/// * `hit_soft_17` - Force the dealer-hits-soft-17 variant on
/// * `output` - Path for JSONL round records
/// * `out` - Output stream for normal messages
/// * `err` - Output stream for error messages
///
/// # Returns
///
/// `Ok(())` on success, or `CliError` on failure
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    rounds: u64,
    seats: &str,
    decks: Option<u8>,
    penetration: Option<f64>,
    seed: Option<u64>,
    hit_soft_17: bool,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    let decks = decks.unwrap_or(cfg.decks);
    let penetration = penetration.unwrap_or(cfg.penetration);
    let hit_soft_17 = hit_soft_17 || cfg.hit_soft_17;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let specs: Vec<&str> = seats
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if specs.is_empty() {
        ui::write_error(err, "at least one seat is required")?;
        return Err(CliError::InvalidInput(
            "at least one seat is required".to_string(),
        ));
    }

    let rules = StandardRules::new(hit_soft_17);
    let mut game = match Game::new(Box::new(rules), decks, penetration, Some(seed)) {
        Ok(g) => g,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };
    let mut names = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let strategy = match create_strategy(spec) {
            Some(s) => s,
            None => {
                ui::write_error(err, &format!("Unknown strategy: {}", spec))?;
                return Err(CliError::InvalidInput(format!(
                    "Unknown strategy: {}",
                    spec
                )));
            }
        };
        names.push(strategy.name().to_string());
        let seat = (i + 1) as u8;
        if let Err(e) = game.add_player(seat, strategy) {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    }

    let mut sink = match output.as_deref() {
        Some(path) => {
            let path = std::path::Path::new(path);
            if let Err(e) = ensure_parent_dir(path) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            match JsonlSink::create(path) {
                Ok(s) => Some(s),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open {}: {}", path.display(), e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let outcome = match game.play(
        rounds,
        sink.as_mut()
            .map(|s| s as &mut dyn twentyone_engine::logger::RecordSink),
    ) {
        Ok(o) => o,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    writeln!(out, "Simulated: {} rounds (seed {})", rounds, seed)?;
    for (seat, ppd) in &outcome {
        let name = &names[(*seat as usize) - 1];
        writeln!(out, "seat {} ({}): profit/dollar {:+.4}", seat, name, ppd)?;
    }
    if let Some(path) = output.as_deref() {
        writeln!(out, "Recorded: {}", path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_sim_command_basic_execution() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(
            10,
            "basic",
            Some(6),
            Some(0.75),
            Some(42),
            false,
            None,
            &mut out,
            &mut err,
        );
        assert!(result.is_ok());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Simulated: 10 rounds"));
        assert!(output.contains("seat 1 (basic)"));
    }

    #[test]
    #[serial]
    fn test_sim_command_zero_rounds() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(
            0,
            "basic",
            None,
            None,
            Some(42),
            false,
            None,
            &mut out,
            &mut err,
        );
        assert!(result.is_err());

        let error_output = String::from_utf8(err).unwrap();
        assert!(error_output.contains("rounds must be >= 1"));
    }

    #[test]
    #[serial]
    fn test_sim_command_unknown_strategy() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(
            1,
            "clairvoyant",
            None,
            None,
            Some(42),
            false,
            None,
            &mut out,
            &mut err,
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let error_output = String::from_utf8(err).unwrap();
        assert!(error_output.contains("Unknown strategy: clairvoyant"));
    }

    #[test]
    #[serial]
    fn test_sim_command_is_deterministic_per_seed() {
        let run = || {
            let mut out = Vec::new();
            let mut err = Vec::new();
            handle_sim_command(
                50,
                "basic,mimic",
                Some(2),
                Some(0.5),
                Some(7),
                false,
                None,
                &mut out,
                &mut err,
            )
            .unwrap();
            String::from_utf8(out).unwrap()
        };
        assert_eq!(run(), run());
    }
}

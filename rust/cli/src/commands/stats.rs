//! Statistics aggregation command for round-record analysis.
//!
//! Reads a JSONL (or .jsonl.zst) round-record file, recomputes cumulative
//! winnings and profit-per-dollar per seat from the per-round nets, and
//! cross-checks them against the redundant cumulative fields recorded by
//! the engine. A mismatch means the file was not produced by a single
//! consistent run and is reported as an error.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use std::collections::BTreeMap;
use std::io::Write;
use twentyone_engine::logger::{GameSummary, RoundRecord};

struct SeatTotals {
    strategy: String,
    net: f64,
    wagered: f64,
}

/// Aggregates statistics from a JSONL round-record file.
///
/// # Arguments
///
/// * `input` - Path to a .jsonl or .jsonl.zst record file
/// * `out` - Output stream for the statistics report
/// * `err` - Output stream for error messages and warnings
///
/// # Returns
///
/// `Result<(), CliError>`: `Ok(())` when statistics are valid, otherwise
/// an `Err` that maps to exit code `2`.
///
/// # Validation
///
/// - Detects corrupted or incomplete records
/// - Verifies recorded cumulative winnings against the sum of round nets
/// - Verifies recorded profit-per-dollar against net / wagered
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(input).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", input, e));
        CliError::Config(format!("Failed to read {}: {}", input, e))
    })?;

    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut totals: BTreeMap<u8, SeatTotals> = BTreeMap::new();
    let mut rounds = 0u64;
    let mut corrupted = 0u64;
    let mut skipped = 0u64;
    let mut summary: Option<GameSummary> = None;
    let mut consistent = true;

    for (i, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => {
                // A torn final line means an interrupted run, not corruption.
                if i == lines.len() - 1 && !has_trailing_nl {
                    skipped += 1;
                } else {
                    corrupted += 1;
                }
                continue;
            }
        };

        if let Some(s) = parsed.get("summary") {
            match serde_json::from_value::<GameSummary>(s.clone()) {
                Ok(s) => summary = Some(s),
                Err(_) => corrupted += 1,
            }
            continue;
        }

        let rec: RoundRecord = match serde_json::from_value(parsed) {
            Ok(r) => r,
            Err(_) => {
                corrupted += 1;
                continue;
            }
        };

        rounds += 1;
        for seat in &rec.seats {
            let entry = totals.entry(seat.seat).or_insert_with(|| SeatTotals {
                strategy: seat.strategy.clone(),
                net: 0.0,
                wagered: 0.0,
            });
            entry.net += seat.round_net;
            entry.wagered += seat.bet as f64;

            if (seat.game_net - entry.net).abs() > 1e-6 {
                consistent = false;
                ui::write_error(
                    err,
                    &format!(
                        "Cumulative winnings mismatch at round {} seat {}: recorded {}, recomputed {}",
                        rec.round, seat.seat, seat.game_net, entry.net
                    ),
                )?;
            }
            let ppd = if entry.wagered == 0.0 {
                0.0
            } else {
                entry.net / entry.wagered
            };
            if (seat.profit_per_dollar - ppd).abs() > 1e-6 {
                consistent = false;
                ui::write_error(
                    err,
                    &format!(
                        "Profit-per-dollar mismatch at round {} seat {}",
                        rec.round, seat.seat
                    ),
                )?;
            }
        }
    }

    if let Some(s) = &summary {
        if s.rounds != rounds {
            consistent = false;
            ui::write_error(
                err,
                &format!(
                    "Summary claims {} rounds but the file holds {}",
                    s.rounds, rounds
                ),
            )?;
        }
    }

    if corrupted > 0 {
        ui::display_warning(err, &format!("{} corrupted record(s) ignored", corrupted))?;
    }
    if skipped > 0 {
        ui::display_warning(err, &format!("{} incomplete record(s) skipped", skipped))?;
    }

    writeln!(out, "Rounds: {}", rounds)?;
    for (seat, t) in &totals {
        let ppd = if t.wagered == 0.0 {
            0.0
        } else {
            t.net / t.wagered
        };
        writeln!(
            out,
            "seat {} ({}): net {:+.2}, wagered {:.2}, profit/dollar {:+.4}",
            seat, t.strategy, t.net, t.wagered, ppd
        )?;
    }

    if !consistent {
        return Err(CliError::InvalidInput(
            "Record cross-check failed".to_string(),
        ));
    }
    Ok(())
}

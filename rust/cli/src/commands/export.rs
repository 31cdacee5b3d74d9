//! Round-record export command.
//!
//! Converts a JSONL round-record file to analysis-friendly formats: a wide
//! CSV with one row per round and per-seat columns in seat order, or a
//! single JSON array.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use std::io::Write;
use twentyone_engine::logger::RoundRecord;

/// Handles the export command to convert round records between formats.
///
/// # Arguments
///
/// * `input` - Path to input JSONL file
/// * `output` - Path to output file
/// * `format` - Output format ("csv" or "json")
/// * `out` - Output stream for status messages
/// * `err` - Output stream for error messages
///
/// # Returns
///
/// `Result<(), CliError>`: `Ok(())` when export completes successfully.
pub fn handle_export_command(
    input: &str,
    output: &str,
    format: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(input).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", input, e));
        CliError::Config(format!("Failed to read {}: {}", input, e))
    })?;

    match format {
        f if f.eq_ignore_ascii_case("csv") => export_csv(&content, output, err)?,
        f if f.eq_ignore_ascii_case("json") => export_json(&content, output, err)?,
        _ => {
            ui::write_error(err, &format!("Unsupported format: {}", format))?;
            return Err(CliError::InvalidInput(format!(
                "Unsupported format: {}",
                format
            )));
        }
    }
    writeln!(out, "Exported: {}", output)?;
    Ok(())
}

fn create_output(output: &str, err: &mut dyn Write) -> Result<std::io::BufWriter<std::fs::File>, CliError> {
    if let Some(parent) = std::path::Path::new(output).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            let _ = ui::write_error(
                err,
                &format!("Failed to create parent directory for {}: {}", output, e),
            );
            CliError::Io(e)
        })?;
    }
    std::fs::File::create(output)
        .map(std::io::BufWriter::new)
        .map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to write {}: {}", output, e));
            CliError::Io(e)
        })
}

/// Export to wide CSV: one row per round, one column group per seat. All
/// records must share the same seat layout; the header comes from the
/// first record. Summary lines are ignored.
fn export_csv(content: &str, output: &str, err: &mut dyn Write) -> Result<(), CliError> {
    let mut w = create_output(output, err)?;
    let mut seat_layout: Option<Vec<u8>> = None;

    for (idx, line) in content.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let parsed: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                ui::write_error(err, &format!("Invalid record at line {}: {}", idx + 1, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Invalid record at line {}: {}",
                    idx + 1,
                    e
                )));
            }
        };
        if parsed.get("summary").is_some() {
            continue;
        }
        let rec: RoundRecord = match serde_json::from_value(parsed) {
            Ok(r) => r,
            Err(e) => {
                ui::write_error(err, &format!("Invalid record at line {}: {}", idx + 1, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Invalid record at line {}: {}",
                    idx + 1,
                    e
                )));
            }
        };

        let seats: Vec<u8> = rec.seats.iter().map(|s| s.seat).collect();
        match &seat_layout {
            None => {
                let mut header =
                    "round,ruleset,decks,reshuffle_threshold,penetration,ts".to_string();
                for s in &rec.seats {
                    header.push_str(&format!(
                        ",bet_{seat},net_{seat},game_net_{seat},profit_per_dollar_{seat}",
                        seat = s.seat
                    ));
                }
                writeln!(w, "{}", header)?;
                seat_layout = Some(seats);
            }
            Some(layout) if *layout != seats => {
                ui::write_error(
                    err,
                    &format!("Seat layout changed at line {}", idx + 1),
                )?;
                return Err(CliError::InvalidInput(format!(
                    "Seat layout changed at line {}",
                    idx + 1
                )));
            }
            Some(_) => {}
        }

        let mut row = format!(
            "{},{},{},{},{},{}",
            rec.round,
            rec.ruleset,
            rec.decks,
            rec.reshuffle_threshold,
            rec.penetration,
            rec.ts.unwrap_or_default()
        );
        for s in &rec.seats {
            row.push_str(&format!(
                ",{},{},{},{}",
                s.bet, s.round_net, s.game_net, s.profit_per_dollar
            ));
        }
        writeln!(w, "{}", row)?;
    }
    Ok(())
}

/// Export to JSON array format, keeping records as-is.
fn export_json(content: &str, output: &str, err: &mut dyn Write) -> Result<(), CliError> {
    let mut arr = Vec::new();
    for (idx, line) in content.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let v: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                ui::write_error(err, &format!("Invalid record at line {}: {}", idx + 1, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Invalid record at line {}: {}",
                    idx + 1,
                    e
                )));
            }
        };
        arr.push(v);
    }
    let s = serde_json::to_string_pretty(&arr).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to serialize JSON: {}", e));
        CliError::InvalidInput(format!("Failed to serialize JSON: {}", e))
    })?;
    let mut w = create_output(output, err)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

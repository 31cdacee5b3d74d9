use serde::{Deserialize, Serialize};

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One seat's results within a [`RoundRecord`], in seat order.
///
/// `game_net` and `profit_per_dollar` are derivable from the per-round
/// nets; they are recorded anyway so downstream consumers can sanity-check
/// their own aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRoundResult {
    /// Seat identifier
    pub seat: u8,
    /// Name of the strategy playing this seat
    pub strategy: String,
    /// Wager placed this round
    pub bet: u32,
    /// Net winnings for this round (signed)
    pub round_net: f64,
    /// Cumulative net winnings so far
    pub game_net: f64,
    /// Cumulative net winnings per dollar wagered so far
    pub profit_per_dollar: f64,
}

/// Complete record of one round, emitted to the caller-supplied sink.
/// Serialized to JSONL for offline analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number within the game
    pub round: u64,
    /// Name of the active ruleset
    pub ruleset: String,
    /// Decks in the shoe
    pub decks: u8,
    /// Penetration threshold that triggers a reshuffle
    pub reshuffle_threshold: f64,
    /// Shoe penetration at the start of this round, before dealing
    pub penetration: f64,
    /// Per-seat results in ascending seat order
    pub seats: Vec<SeatRoundResult>,
    /// Timestamp when the round was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

/// One seat's totals in a [`GameSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub seat: u8,
    pub strategy: String,
    /// Cumulative net winnings over the whole game
    pub game_net: f64,
    /// Cumulative amount wagered over the whole game
    pub total_wagered: f64,
    /// `game_net / total_wagered`, the strategy-comparison metric
    pub profit_per_dollar: f64,
}

/// Whole-game totals, emitted once after the final round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Rounds actually played
    pub rounds: u64,
    /// Per-seat totals in ascending seat order
    pub seats: Vec<SeatSummary>,
}

/// Consumer of structured round/game records.
///
/// The engine emits records as data and never commits to a serialization
/// format; sinks decide what to do with them.
pub trait RecordSink {
    fn write_round(&mut self, record: &RoundRecord) -> std::io::Result<()>;
    fn write_summary(&mut self, summary: &GameSummary) -> std::io::Result<()>;
}

/// Record sink that appends one JSON document per line.
///
/// Round records are written as they come; the game summary is written as a
/// final line wrapped in `{"summary": ...}` so consumers can tell the two
/// apart. Missing timestamps are injected at write time.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    fn write_line(&mut self, value: &impl Serialize) -> std::io::Result<()> {
        let line = serde_json::to_string(value).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl RecordSink for JsonlSink {
    fn write_round(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        self.write_line(&rec)
    }

    fn write_summary(&mut self, summary: &GameSummary) -> std::io::Result<()> {
        self.write_line(&serde_json::json!({ "summary": summary }))
    }
}

/// In-memory sink for tests and library callers that post-process records
/// without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rounds: Vec<RoundRecord>,
    pub summaries: Vec<GameSummary>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_round(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        self.rounds.push(record.clone());
        Ok(())
    }

    fn write_summary(&mut self, summary: &GameSummary) -> std::io::Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

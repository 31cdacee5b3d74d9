//! # Twentyone CLI Library
//!
//! This library provides the command-line interface for the twentyone
//! blackjack simulation engine. It exposes subcommands for running
//! simulations, aggregating statistics, and exporting round records.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["twentyone", "sim", "--rounds", "100", "--seats", "basic"];
//! let code = twentyone_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run a simulation and optionally record round results as JSONL
//! - `stats`: Aggregate and cross-check statistics from recorded rounds
//! - `export`: Convert recorded rounds to CSV or a JSON array
//! - `cfg`: Display the resolved configuration and value sources

use clap::{Parser, Subcommand};
use std::io::Write;

mod commands;
pub mod config;
mod error;
pub mod io_utils;
pub mod ui;

pub mod exit_code;

use commands::{
    handle_cfg_command, handle_export_command, handle_sim_command, handle_stats_command,
};
pub use error::CliError;

#[derive(Parser)]
#[command(name = "twentyone", about = "Blackjack strategy simulator")]
struct TwentyoneCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rounds of blackjack and report profit-per-dollar per seat
    Sim {
        /// Number of rounds to play
        #[arg(long, default_value_t = 1000)]
        rounds: u64,
        /// Comma-separated seat specs, e.g. "basic,mimic:5,hilo:10"
        #[arg(long, default_value = "basic")]
        seats: String,
        /// Decks in the shoe (overrides config)
        #[arg(long)]
        decks: Option<u8>,
        /// Reshuffle penetration threshold in (0, 1] (overrides config)
        #[arg(long)]
        penetration: Option<f64>,
        /// RNG seed for the shoe (overrides config; random if unset)
        #[arg(long)]
        seed: Option<u64>,
        /// Dealer hits soft 17
        #[arg(long)]
        hit_soft_17: bool,
        /// Path for JSONL round records
        #[arg(long)]
        output: Option<String>,
    },
    /// Aggregate statistics from a JSONL round-record file
    Stats {
        /// Path to a .jsonl or .jsonl.zst record file
        #[arg(long)]
        input: String,
    },
    /// Convert round records to another format
    Export {
        /// Path to the input JSONL file
        #[arg(long)]
        input: String,
        /// Path for the converted output
        #[arg(long)]
        output: String,
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// Display the resolved configuration
    Cfg,
}

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    let cli = match TwentyoneCli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders help/usage itself; keep its formatting.
            let _ = write!(err, "{}", e);
            return match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    exit_code::SUCCESS
                }
                _ => exit_code::ERROR,
            };
        }
    };

    let result = match cli.command {
        Commands::Sim {
            rounds,
            seats,
            decks,
            penetration,
            seed,
            hit_soft_17,
            output,
        } => handle_sim_command(
            rounds,
            &seats,
            decks,
            penetration,
            seed,
            hit_soft_17,
            output,
            out,
            err,
        ),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Export {
            input,
            output,
            format,
        } => handle_export_command(&input, &output, &format, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(_) => exit_code::ERROR,
    }
}

//! Command handler modules for the twentyone CLI.
//!
//! This module contains individual handler functions for each CLI
//! subcommand. Each command is implemented in its own module file with a
//! consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers: Helper functions specific to that command
//! - Dependency injection: Output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum

pub mod cfg;
pub mod export;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use export::handle_export_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

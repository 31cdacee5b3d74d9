//! # twentyone-strategies: Player Strategies for Blackjack Simulation
//!
//! Provides concrete [`Strategy`] implementations for the simulation
//! engine, from a naive dealer-mimic baseline to a card-counting bettor,
//! plus a factory for building them from a textual spec.
//!
//! ## Core Components
//!
//! - [`mimic`] - Dealer-mimic baseline (hit to 16, flat bet)
//! - [`basic`] - Basic strategy hit/stand table keyed on the dealer upcard
//! - [`hilo`] - Hi-Lo counting strategy with a true-count bet ramp
//! - [`create_strategy`] - Factory building a strategy from a spec string
//!
//! ## Quick Start
//!
//! ```rust
//! use twentyone_strategies::create_strategy;
//!
//! let strategy = create_strategy("basic:25").expect("known strategy");
//! assert_eq!(strategy.name(), "basic");
//! ```
//!
//! ## Strategy Specs
//!
//! A spec is a name with an optional `:BET` flat-bet suffix:
//!
//! - `"mimic"` - hit while the best total is 16 or less
//! - `"basic"` - the full hard/soft basic table
//! - `"hilo"` - basic table plus a Hi-Lo bet ramp (`BET` is the base bet)
//!
//! The default bet is 1 unit, so profit-per-dollar comparisons line up
//! across strategies out of the box.

use twentyone_engine::strategy::Strategy;

pub mod basic;
pub mod hilo;
pub mod mimic;

/// Default flat bet when a spec carries no `:BET` suffix.
pub const DEFAULT_BET: u32 = 1;

/// Build a strategy from a spec string like `"basic"` or `"hilo:10"`.
///
/// Returns `None` for an unknown name or an unparsable/zero bet suffix, so
/// callers can surface a configuration error instead of starting a game
/// with a strategy that was never asked for.
///
/// # Examples
///
/// ```
/// use twentyone_strategies::create_strategy;
///
/// assert!(create_strategy("mimic").is_some());
/// assert!(create_strategy("hilo:10").is_some());
/// assert!(create_strategy("martingale").is_none());
/// assert!(create_strategy("basic:0").is_none());
/// ```
pub fn create_strategy(spec: &str) -> Option<Box<dyn Strategy>> {
    let (name, bet) = match spec.split_once(':') {
        Some((name, bet)) => {
            let bet: u32 = bet.parse().ok()?;
            if bet == 0 {
                return None;
            }
            (name, bet)
        }
        None => (spec, DEFAULT_BET),
    };
    match name {
        "mimic" => Some(Box::new(mimic::DealerMimic::with_bet(bet))),
        "basic" => Some(Box::new(basic::BasicStrategy::with_bet(bet))),
        "hilo" => Some(Box::new(hilo::HiLoCounter::with_base_bet(bet))),
        _ => None,
    }
}

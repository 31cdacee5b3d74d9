//! Dealer-mimic baseline strategy.
//!
//! Plays exactly the way the standard dealer does — hit while the best
//! total is 16 or less — with a flat bet. Useful as a floor when comparing
//! smarter strategies: mimicking the dealer forfeits the information in
//! the upcard, so anything reasonable should beat it per dollar.

use twentyone_engine::player::Action;
use twentyone_engine::strategy::{BetContext, PlayContext, Strategy};

/// Flat-betting strategy that hits to 16 and stands from 17 up.
#[derive(Debug, Clone)]
pub struct DealerMimic {
    bet: u32,
}

impl DealerMimic {
    pub fn new() -> Self {
        Self::with_bet(crate::DEFAULT_BET)
    }

    pub fn with_bet(bet: u32) -> Self {
        Self { bet }
    }
}

impl Default for DealerMimic {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for DealerMimic {
    fn advise_bet(&mut self, _ctx: &BetContext) -> u32 {
        self.bet
    }

    fn advise_play(&mut self, ctx: &PlayContext, options: &[Action]) -> Action {
        match ctx.hand.best_total() {
            Some(total) if total <= 16 && options.contains(&Action::Hit) => Action::Hit,
            _ => Action::Stand,
        }
    }

    fn name(&self) -> &str {
        "mimic"
    }
}

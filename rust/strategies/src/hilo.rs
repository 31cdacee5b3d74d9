//! Hi-Lo counting strategy.
//!
//! Keeps the classic running count over every card revealed at the table
//! (+1 for 2-6, 0 for 7-9, -1 for tens, faces, and aces), converts it to a
//! true count by dividing by the decks still in the shoe, and ramps the
//! bet with a positive true count. Play decisions come from the basic
//! table.

use twentyone_engine::cards::{Card, Rank};
use twentyone_engine::player::Action;
use twentyone_engine::strategy::{BetContext, PlayContext, Strategy};

use crate::basic::basic_action;

/// Largest multiple of the base bet the ramp will reach.
const MAX_BET_SCALAR: u32 = 8;

/// Hi-Lo tag for one card.
fn hilo_tag(card: Card) -> i32 {
    match card.rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

/// Basic-table play with a Hi-Lo bet ramp.
///
/// The bet is `base_bet * ceil(true_count)` when the true count is above
/// +1 (capped at [`MAX_BET_SCALAR`] base bets), and the base bet
/// otherwise. The count is fed by [`Strategy::observe_card`] and reset by
/// [`Strategy::observe_shuffle`].
#[derive(Debug, Clone)]
pub struct HiLoCounter {
    base_bet: u32,
    running_count: i32,
}

impl HiLoCounter {
    pub fn new() -> Self {
        Self::with_base_bet(crate::DEFAULT_BET)
    }

    pub fn with_base_bet(base_bet: u32) -> Self {
        Self {
            base_bet,
            running_count: 0,
        }
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Running count divided by decks remaining. Clamps the divisor at a
    /// quarter deck so a nearly-exhausted shoe cannot blow the ratio up.
    pub fn true_count(&self, num_decks: u8, penetration: f64) -> f64 {
        let decks_remaining = (num_decks as f64 * (1.0 - penetration)).max(0.25);
        self.running_count as f64 / decks_remaining
    }
}

impl Default for HiLoCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for HiLoCounter {
    fn advise_bet(&mut self, ctx: &BetContext) -> u32 {
        let tc = self.true_count(ctx.num_decks, ctx.penetration);
        if tc > 1.0 {
            let scalar = (tc.ceil() as u32).min(MAX_BET_SCALAR);
            self.base_bet * scalar
        } else {
            self.base_bet
        }
    }

    fn advise_play(&mut self, ctx: &PlayContext, options: &[Action]) -> Action {
        let upcard_value = *ctx.dealer_upcard.values().last().unwrap_or(&10);
        let action = basic_action(ctx.hand, upcard_value);
        if options.contains(&action) {
            action
        } else {
            Action::Stand
        }
    }

    fn observe_card(&mut self, card: Card) {
        self.running_count += hilo_tag(card);
    }

    fn observe_shuffle(&mut self) {
        self.running_count = 0;
    }

    fn name(&self) -> &str {
        "hilo"
    }
}

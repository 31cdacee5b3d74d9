use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hand::Hand;

/// A play decision for one hand during a round.
///
/// The engine only ever offers actions drawn from
/// [`crate::rules::RuleSet::player_options`], so adding a variant here (for
/// a future double-down or split rule) extends the contract without
/// touching the round loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take another card
    Hit,
    /// Keep the current hand and end the turn
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
        }
    }
}

/// One seated participant: a seat id, the current round's hand and bet, and
/// the winnings accumulators that survive across rounds.
///
/// Players are created once via `Game::add_player` and persist for the
/// whole game; the hand and bet inside are reset each round.
#[derive(Debug)]
pub struct Player {
    seat: u8,
    hand: Hand,
    bet: u32,
    round_net: f64,
    game_net: f64,
    total_wagered: f64,
}

impl Player {
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            bet: 0,
            round_net: 0.0,
            game_net: 0.0,
            total_wagered: 0.0,
        }
    }

    pub fn seat(&self) -> u8 {
        self.seat
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Wager for the current round, zero between rounds.
    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.bet = 0;
        self.round_net = 0.0;
    }

    /// Record this round's wager. The amount has already been validated by
    /// the game (positive, from the strategy contract).
    pub fn place_bet(&mut self, amount: u32) {
        self.bet = amount;
        self.total_wagered += amount as f64;
    }

    /// Apply a signed settlement amount to the round and game totals.
    pub fn settle(&mut self, net: f64) {
        self.round_net += net;
        self.game_net += net;
    }

    pub fn round_net(&self) -> f64 {
        self.round_net
    }

    pub fn game_net(&self) -> f64 {
        self.game_net
    }

    pub fn total_wagered(&self) -> f64 {
        self.total_wagered
    }

    /// Cumulative net winnings per dollar wagered, the strategy-comparison
    /// metric. Zero before any wager has been placed.
    pub fn profit_per_dollar(&self) -> f64 {
        if self.total_wagered == 0.0 {
            0.0
        } else {
            self.game_net / self.total_wagered
        }
    }
}

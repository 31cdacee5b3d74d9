use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("shoe exhausted: all {capacity} cards dealt without a reshuffle")]
    EmptyShoe { capacity: usize },
    #[error("invalid shoe configuration ({num_decks} decks): {reason}")]
    InvalidShoeConfig { num_decks: u8, reason: &'static str },
    #[error("reshuffle threshold {threshold} outside (0, 1]")]
    InvalidThreshold { threshold: f64 },
    #[error("seat {seat} is already taken")]
    DuplicateSeat { seat: u8 },
    #[error("cannot play a round with no players seated")]
    NoPlayers,
    #[error("invalid bet {amount} from seat {seat}: bets must be positive")]
    InvalidBet { seat: u8, amount: u32 },
    #[error("seat {seat} chose {action} which is not among its legal options")]
    IllegalAction { seat: u8, action: Action },
    #[error("record sink failure: {0}")]
    Sink(#[from] std::io::Error),
}

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Number of cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// A multi-deck shoe that cards are dealt from until a reshuffle point.
///
/// The shoe owns its RNG: the seed passed at construction governs the
/// initial shuffle and every reshuffle after it, so a whole game is
/// reproducible from a single `u64`. Cards are dispensed by advancing a
/// cursor; a dispensed card never returns until [`Shoe::reshuffle`]
/// rebuilds the shoe from scratch.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    position: usize,
    num_decks: u8,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Build a shuffled shoe of `num_decks` standard decks.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidShoeConfig`] if `num_decks` is zero.
    pub fn new(num_decks: u8, seed: u64) -> Result<Self, GameError> {
        if num_decks == 0 {
            return Err(GameError::InvalidShoeConfig {
                num_decks,
                reason: "a shoe needs at least one deck",
            });
        }
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let mut shoe = Self {
            cards: Vec::new(),
            position: 0,
            num_decks,
            rng,
        };
        shoe.reshuffle();
        Ok(shoe)
    }

    /// Rebuild the shoe wholesale: fresh decks, shuffled, cursor reset.
    ///
    /// The RNG stream carries over, so consecutive shuffles within a game
    /// stay on the seeded sequence.
    pub fn reshuffle(&mut self) {
        let mut cards = Vec::with_capacity(self.capacity());
        for _ in 0..self.num_decks {
            cards.extend(full_deck());
        }
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        self.position = 0;
    }

    /// Remove and return the next card.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyShoe`] when nothing remains. The game
    /// orchestrator checks the reshuffle policy at round boundaries, so an
    /// empty shoe mid-round signals a policy bug and is fatal.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.position >= self.cards.len() {
            Err(GameError::EmptyShoe {
                capacity: self.capacity(),
            })
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Ok(c)
        }
    }

    /// Fraction of the current shoe already dealt, in `[0, 1]`.
    pub fn penetration(&self) -> f64 {
        self.position as f64 / self.capacity() as f64
    }

    /// True once dealt cards have reached the reshuffle threshold.
    /// Checked at round boundaries only, never mid-round, so a single round
    /// is never dealt from two shoe instances.
    pub fn needs_reshuffle(&self, threshold: f64) -> bool {
        self.penetration() >= threshold
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    /// Total cards the shoe holds when full.
    pub fn capacity(&self) -> usize {
        self.num_decks as usize * DECK_SIZE
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

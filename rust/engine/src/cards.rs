use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// In blackjack a rank does not map to a single value: an Ace may count as
/// 1 or 11, and ten/face cards all count as 10. [`Rank::values`] exposes
/// the full set of values a rank may contribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (counts 10)
    Jack,
    /// Queen (counts 10)
    Queen,
    /// King (counts 10)
    King,
    /// Ace (counts 1 or 11)
    Ace,
}

impl Rank {
    /// All values this rank may contribute to a hand total.
    ///
    /// Only the Ace has more than one value, but every rank returns a slice
    /// so scoring code never has to treat ranks differently.
    pub fn values(&self) -> &'static [u8] {
        match self {
            Rank::Ace => &[1, 11],
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => &[10],
            Rank::Two => &[2],
            Rank::Three => &[3],
            Rank::Four => &[4],
            Rank::Five => &[5],
            Rank::Six => &[6],
            Rank::Seven => &[7],
            Rank::Eight => &[8],
            Rank::Nine => &[9],
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are the fundamental unit of the game, used in player and dealer
/// hands and in the [`crate::shoe::Shoe`]. Immutable after creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    /// All hand-total values this card may contribute. Delegates to
    /// [`Rank::values`].
    pub fn values(&self) -> &'static [u8] {
        self.rank.values()
    }
}

impl fmt::Display for Card {
    /// Short display form, e.g. `A♠` or `10♥`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ace_contributes_one_or_eleven() {
        let ace = Card {
            suit: Suit::Spades,
            rank: Rank::Ace,
        };
        assert_eq!(ace.values(), &[1, 11]);
    }

    #[test]
    fn ten_and_face_cards_contribute_ten() {
        for r in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(r.values(), &[10]);
        }
    }

    #[test]
    fn pip_cards_contribute_their_rank() {
        assert_eq!(Rank::Eight.values(), &[8]);
        assert_eq!(Rank::Two.values(), &[2]);
    }

    #[test]
    fn display_form_is_rank_then_suit() {
        let c = Card {
            suit: Suit::Hearts,
            rank: Rank::Queen,
        };
        assert_eq!(c.to_string(), "Q♥");
        let t = Card {
            suit: Suit::Clubs,
            rank: Rank::Ten,
        };
        assert_eq!(t.to_string(), "10♣");
    }

    #[test]
    fn full_deck_has_52_cards() {
        assert_eq!(full_deck().len(), 52);
    }
}

//! Basic strategy (hit/stand only).
//!
//! The classic table keyed on the player's total, its softness, and the
//! dealer's upcard:
//!
//! - always hit hard 11 or less
//! - stand on hard 12 against a dealer 4-6, otherwise hit
//! - stand on hard 13-16 against a dealer 2-6, otherwise hit
//! - always stand on hard 17 or more
//! - always hit soft 17 or less
//! - stand on soft 18 except against a dealer 9, 10, or ace
//! - always stand on soft 19 or more

use twentyone_engine::hand::Hand;
use twentyone_engine::player::Action;
use twentyone_engine::strategy::{BetContext, PlayContext, Strategy};

/// Hit/stand decision from the basic table. `upcard_value` is the dealer
/// upcard's high value, 2 through 11 (ace).
pub fn basic_action(hand: &Hand, upcard_value: u8) -> Action {
    let total = match hand.best_total() {
        Some(t) => t,
        None => return Action::Stand,
    };
    let hit = if hand.is_soft() {
        total <= 17 || (total == 18 && matches!(upcard_value, 9 | 10 | 11))
    } else {
        match total {
            0..=11 => true,
            12 => !matches!(upcard_value, 4..=6),
            13..=16 => !matches!(upcard_value, 2..=6),
            _ => false,
        }
    };
    if hit {
        Action::Hit
    } else {
        Action::Stand
    }
}

/// Flat-betting strategy playing the basic table.
#[derive(Debug, Clone)]
pub struct BasicStrategy {
    bet: u32,
}

impl BasicStrategy {
    pub fn new() -> Self {
        Self::with_bet(crate::DEFAULT_BET)
    }

    pub fn with_bet(bet: u32) -> Self {
        Self { bet }
    }
}

impl Default for BasicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BasicStrategy {
    fn advise_bet(&mut self, _ctx: &BetContext) -> u32 {
        self.bet
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

    fn name(&self) -> &str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twentyone_engine::cards::{Card, Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut h = Hand::new();
        for &rank in ranks {
            h.add_card(Card {
                suit: Suit::Clubs,
                rank,
            });
        }
        h
    }

    #[test]
    fn hard_twelve_stands_only_against_a_weak_dealer() {
        let twelve = hand_of(&[Rank::Ten, Rank::Two]);
        for up in 2..=11 {
            let expected = if (4..=6).contains(&up) {
                Action::Stand
            } else {
                Action::Hit
            };
            assert_eq!(basic_action(&twelve, up), expected, "upcard {}", up);
        }
    }

    #[test]
    fn hard_thirteen_to_sixteen_stand_against_two_through_six() {
        let fourteen = hand_of(&[Rank::Ten, Rank::Four]);
        assert_eq!(basic_action(&fourteen, 2), Action::Stand);
        assert_eq!(basic_action(&fourteen, 6), Action::Stand);
        assert_eq!(basic_action(&fourteen, 7), Action::Hit);
        assert_eq!(basic_action(&fourteen, 11), Action::Hit);
    }

    #[test]
    fn hard_seventeen_always_stands() {
        let seventeen = hand_of(&[Rank::Ten, Rank::Seven]);
        for up in 2..=11 {
            assert_eq!(basic_action(&seventeen, up), Action::Stand);
        }
    }

    #[test]
    fn soft_eighteen_hits_only_against_nine_ten_ace() {
        let soft_18 = hand_of(&[Rank::Ace, Rank::Seven]);
        for up in 2..=11 {
            let expected = if matches!(up, 9 | 10 | 11) {
                Action::Hit
            } else {
                Action::Stand
            };
            assert_eq!(basic_action(&soft_18, up), expected, "upcard {}", up);
        }
    }

    #[test]
    fn soft_seventeen_and_below_always_hit() {
        let soft_17 = hand_of(&[Rank::Ace, Rank::Six]);
        let soft_13 = hand_of(&[Rank::Ace, Rank::Two]);
        for up in 2..=11 {
            assert_eq!(basic_action(&soft_17, up), Action::Hit);
            assert_eq!(basic_action(&soft_13, up), Action::Hit);
        }
    }

    #[test]
    fn soft_nineteen_always_stands() {
        let soft_19 = hand_of(&[Rank::Ace, Rank::Eight]);
        for up in 2..=11 {
            assert_eq!(basic_action(&soft_19, up), Action::Stand);
        }
    }

    #[test]
    fn hard_eleven_and_below_always_hit() {
        let eleven = hand_of(&[Rank::Five, Rank::Six]);
        let five = hand_of(&[Rank::Two, Rank::Three]);
        for up in 2..=11 {
            assert_eq!(basic_action(&eleven, up), Action::Hit);
            assert_eq!(basic_action(&five, up), Action::Hit);
        }
    }
}

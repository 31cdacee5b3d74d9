use crate::hand::{Hand, TARGET};
use crate::player::Action;

/// House-rule contract: which options a player has, how the dealer plays,
/// and how a finished round pays out.
///
/// The engine owns the round state machine but defers every rule decision
/// here, so rule variants (soft-17, payout tables, future double/split
/// options) are swapped in without touching the engine. Implementations
/// are read-only from the engine's point of view.
pub trait RuleSet {
    /// Short name recorded with each round (e.g. `"standard"`).
    fn name(&self) -> &str;

    /// Legal options for a player hand. Minimally `{Hit, Stand}`; an empty
    /// set ends the player's turn.
    fn player_options(&self, hand: &Hand) -> Vec<Action>;

    /// Hit/stand decision for the dealer's current hand.
    fn dealer_play(&self, hand: &Hand) -> Action;

    /// Signed settlement for one player hand against the dealer's final
    /// hand, given the player's wager.
    ///
    /// The default is the standard blackjack table:
    ///
    /// - player bust: `-bet` (regardless of the dealer's final total)
    /// - player natural vs dealer natural: `0`
    /// - player natural: `+1.5 × bet`
    /// - dealer bust, or player total beats dealer: `+bet`
    /// - equal totals: `0`
    /// - otherwise: `-bet`
    ///
    /// # Examples
    ///
    /// ```
    /// use twentyone_engine::cards::{Card, Rank, Suit};
    /// use twentyone_engine::hand::Hand;
    /// use twentyone_engine::rules::{RuleSet, StandardRules};
    ///
    /// fn hand_of(ranks: &[Rank]) -> Hand {
    ///     let mut h = Hand::new();
    ///     for &rank in ranks {
    ///         h.add_card(Card { suit: Suit::Spades, rank });
    ///     }
    ///     h
    /// }
    ///
    /// let rules = StandardRules::default();
    /// let natural = hand_of(&[Rank::Ace, Rank::King]);
    /// let nineteen = hand_of(&[Rank::Ten, Rank::Nine]);
    /// assert_eq!(rules.payout(&natural, &nineteen, 10), 15.0);
    /// assert_eq!(rules.payout(&nineteen, &nineteen, 10), 0.0);
    /// ```
    fn payout(&self, player: &Hand, dealer: &Hand, bet: u32) -> f64 {
        let bet = bet as f64;
        let player_total = match player.best_total() {
            Some(t) => t,
            None => return -bet,
        };
        if player.is_blackjack() {
            return if dealer.is_blackjack() { 0.0 } else { 1.5 * bet };
        }
        if dealer.is_blackjack() {
            return -bet;
        }
        match dealer.best_total() {
            None => bet,
            Some(dealer_total) => {
                if player_total > dealer_total {
                    bet
                } else if player_total < dealer_total {
                    -bet
                } else {
                    0.0
                }
            }
        }
    }
}

/// The default house rules.
///
/// Players may hit on anything below 21. The dealer hits below 17 and
/// stands on 17 and above; with `hit_soft_17` the dealer also hits a soft
/// 17 (the "H17" table variant).
#[derive(Debug, Clone, Default)]
pub struct StandardRules {
    pub hit_soft_17: bool,
}

impl StandardRules {
    pub fn new(hit_soft_17: bool) -> Self {
        Self { hit_soft_17 }
    }
}

impl RuleSet for StandardRules {
    fn name(&self) -> &str {
        if self.hit_soft_17 {
            "standard-h17"
        } else {
            "standard"
        }
    }

    fn player_options(&self, hand: &Hand) -> Vec<Action> {
        match hand.best_total() {
            Some(t) if t < TARGET => vec![Action::Hit, Action::Stand],
            _ => vec![Action::Stand],
        }
    }

    fn dealer_play(&self, hand: &Hand) -> Action {
        match hand.best_total() {
            None => Action::Stand,
            Some(total) => {
                if total < 17 {
                    Action::Hit
                } else if total == 17 && self.hit_soft_17 && hand.is_soft() {
                    Action::Hit
                } else {
                    Action::Stand
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut h = Hand::new();
        for &rank in ranks {
            h.add_card(Card {
                suit: Suit::Hearts,
                rank,
            });
        }
        h
    }

    #[test]
    fn dealer_stands_on_hard_17() {
        let rules = StandardRules::default();
        assert_eq!(rules.dealer_play(&hand_of(&[Rank::Ten, Rank::Seven])), Action::Stand);
        assert_eq!(rules.dealer_play(&hand_of(&[Rank::Ten, Rank::Six])), Action::Hit);
    }

    #[test]
    fn soft_17_depends_on_the_variant() {
        let soft_17 = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(StandardRules::new(false).dealer_play(&soft_17), Action::Stand);
        assert_eq!(StandardRules::new(true).dealer_play(&soft_17), Action::Hit);
        // Hard 17 stands under both variants.
        let hard_17 = hand_of(&[Rank::Ten, Rank::Six, Rank::Ace]);
        assert_eq!(StandardRules::new(true).dealer_play(&hard_17), Action::Stand);
    }

    #[test]
    fn player_options_shrink_at_21() {
        let rules = StandardRules::default();
        let twelve = hand_of(&[Rank::Five, Rank::Seven]);
        assert_eq!(rules.player_options(&twelve), vec![Action::Hit, Action::Stand]);
        let twenty_one = hand_of(&[Rank::Five, Rank::Six, Rank::Ten]);
        assert_eq!(rules.player_options(&twenty_one), vec![Action::Stand]);
    }

    #[test]
    fn payout_table_matches_the_standard_game() {
        let rules = StandardRules::default();
        let natural = hand_of(&[Rank::Ace, Rank::Queen]);
        let twenty = hand_of(&[Rank::Ten, Rank::Queen]);
        let nineteen = hand_of(&[Rank::Ten, Rank::Nine]);
        let bust = hand_of(&[Rank::Ten, Rank::Nine, Rank::Five]);

        // Natural pays 3:2 unless the dealer also has one.
        assert_eq!(rules.payout(&natural, &nineteen, 10), 15.0);
        assert_eq!(rules.payout(&natural, &natural, 10), 0.0);
        // Plain win pays even money; push pays nothing.
        assert_eq!(rules.payout(&twenty, &nineteen, 10), 10.0);
        assert_eq!(rules.payout(&twenty, &twenty, 10), 0.0);
        // Loss and bust cost the bet; player bust loses even if the dealer
        // busts as well.
        assert_eq!(rules.payout(&nineteen, &twenty, 10), -10.0);
        assert_eq!(rules.payout(&bust, &bust, 10), -10.0);
        // Dealer bust pays a standing player.
        assert_eq!(rules.payout(&nineteen, &bust, 10), 10.0);
        // A dealt-21 of three cards is not a natural.
        let slow_21 = hand_of(&[Rank::Five, Rank::Six, Rank::Ten]);
        assert_eq!(rules.payout(&slow_21, &nineteen, 10), 10.0);
        assert_eq!(rules.payout(&slow_21, &natural, 10), -10.0);
    }
}

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::Hand;
use crate::player::Action;
use crate::rules::RuleSet;
use crate::shoe::Shoe;

/// The house's seat: one hand per round and no betting state.
///
/// The first card dealt to the dealer is the upcard, visible to every
/// strategy; the second is the hole card, hidden until the dealer plays.
/// The dealer has no policy of its own — hit/stand decisions come from
/// [`RuleSet::dealer_play`] so soft-17 variants live in the ruleset.
#[derive(Debug, Default)]
pub struct Dealer {
    hand: Hand,
}

impl Dealer {
    pub fn new() -> Self {
        Self { hand: Hand::new() }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    pub fn reset_for_round(&mut self) {
        self.hand.clear();
    }

    /// The face-up card, once the initial deal has reached the dealer.
    pub fn upcard(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    /// The face-down card. Engine-internal: never handed to strategies
    /// until the dealer's turn reveals it.
    pub fn hole_card(&self) -> Option<Card> {
        self.hand.cards().get(1).copied()
    }

    /// Play the hand to completion: hit until the ruleset says stand or
    /// the hand busts. Returns the cards drawn so the game can surface
    /// them to observing strategies.
    pub fn play(&mut self, rules: &dyn RuleSet, shoe: &mut Shoe) -> Result<Vec<Card>, GameError> {
        let mut drawn = Vec::new();
        while !self.hand.is_bust() {
            match rules.dealer_play(&self.hand) {
                Action::Hit => {
                    let card = shoe.draw()?;
                    self.hand.add_card(card);
                    drawn.push(card);
                }
                Action::Stand => break,
            }
        }
        Ok(drawn)
    }
}

use crate::cards::Card;
use crate::hand::Hand;
use crate::player::Action;

/// Read-only context handed to [`Strategy::advise_bet`] before the deal.
#[derive(Debug, Copy, Clone)]
pub struct BetContext {
    /// The strategy's own seat.
    pub seat: u8,
    /// Decks in the shoe.
    pub num_decks: u8,
    /// Fraction of the shoe already dealt at this round boundary.
    pub penetration: f64,
    /// The seat's cumulative net winnings so far.
    pub game_net: f64,
}

/// Read-only context handed to [`Strategy::advise_play`] during the
/// player's turn. The dealer's hole card is deliberately absent.
#[derive(Debug, Copy, Clone)]
pub struct PlayContext<'a> {
    /// The strategy's own hand.
    pub hand: &'a Hand,
    /// The dealer's visible card.
    pub dealer_upcard: Card,
    /// Decks in the shoe.
    pub num_decks: u8,
    /// Fraction of the shoe dealt so far.
    pub penetration: f64,
}

/// Trait defining the interface for pluggable player strategies.
///
/// The engine calls [`advise_bet`](Strategy::advise_bet) once per round and
/// [`advise_play`](Strategy::advise_play) repeatedly during the player's
/// turn, always passing the currently legal options. A returned action
/// outside that set is a usage error and aborts the game rather than being
/// coerced.
///
/// Strategies may carry internal state (a card counter, a bet progression);
/// the engine treats them as ordinary synchronous calls and never mutates
/// them beyond invoking these methods.
///
/// # Example Implementation
///
/// ```
/// use twentyone_engine::player::Action;
/// use twentyone_engine::strategy::{BetContext, PlayContext, Strategy};
///
/// struct AlwaysStand;
///
/// impl Strategy for AlwaysStand {
///     fn advise_bet(&mut self, _ctx: &BetContext) -> u32 {
///         1
///     }
///
///     fn advise_play(&mut self, _ctx: &PlayContext, _options: &[Action]) -> Action {
///         Action::Stand
///     }
///
///     fn name(&self) -> &str {
///         "always-stand"
///     }
/// }
/// ```
pub trait Strategy {
    /// Wager for the coming round. Must be positive; the engine rejects a
    /// zero bet as a configuration error.
    fn advise_bet(&mut self, ctx: &BetContext) -> u32;

    /// Choose one of `options` for the current hand. `options` is never
    /// empty when this is called.
    fn advise_play(&mut self, ctx: &PlayContext, options: &[Action]) -> Action;

    /// Called for every card revealed face-up at the table, in deal order:
    /// the strategy's own cards, other seats' cards, the dealer's upcard,
    /// and the dealer's hole card and draws once the dealer plays. Default
    /// is a no-op; counting strategies keep their running count here.
    fn observe_card(&mut self, card: Card) {
        let _ = card;
    }

    /// Called when the shoe is rebuilt, invalidating any count.
    fn observe_shuffle(&mut self) {}

    /// Name recorded with this seat's results.
    fn name(&self) -> &str;
}

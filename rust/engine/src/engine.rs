use std::collections::BTreeMap;

use crate::cards::Card;
use crate::dealer::Dealer;
use crate::errors::GameError;
use crate::logger::{GameSummary, RecordSink, RoundRecord, SeatRoundResult, SeatSummary};
use crate::player::{Action, Player};
use crate::rules::RuleSet;
use crate::shoe::Shoe;
use crate::strategy::{BetContext, PlayContext, Strategy};

/// Seed used when the caller does not supply one.
const DEFAULT_SEED: u64 = 0xDEA1_CA5E;

struct Seat {
    player: Player,
    strategy: Box<dyn Strategy>,
}

/// Core game orchestrator: owns the shoe, the dealer, and the seated
/// players, and drives the per-round state machine
/// `BET → DEAL_INITIAL → PLAYER_TURNS → DEALER_TURN → SETTLE → RECORD`.
///
/// One round fully completes before the next begins; the shoe is the only
/// shared mutable resource and is owned exclusively by the game. The
/// reshuffle check happens at round boundaries only, so no round is dealt
/// from two shoe instances.
///
/// # Examples
///
/// ```
/// use twentyone_engine::engine::Game;
/// use twentyone_engine::player::Action;
/// use twentyone_engine::rules::StandardRules;
/// use twentyone_engine::strategy::{BetContext, PlayContext, Strategy};
///
/// struct Stander;
/// impl Strategy for Stander {
///     fn advise_bet(&mut self, _ctx: &BetContext) -> u32 { 10 }
///     fn advise_play(&mut self, _ctx: &PlayContext, _options: &[Action]) -> Action {
///         Action::Stand
///     }
///     fn name(&self) -> &str { "stander" }
/// }
///
/// let mut game = Game::new(Box::new(StandardRules::default()), 6, 0.75, Some(42)).unwrap();
/// game.add_player(1, Box::new(Stander)).unwrap();
/// let outcome = game.play(100, None).unwrap();
/// assert!(outcome.contains_key(&1));
/// ```
pub struct Game {
    shoe: Shoe,
    rules: Box<dyn RuleSet>,
    seats: Vec<Seat>,
    dealer: Dealer,
    reshuffle_threshold: f64,
    rounds_played: u64,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("shoe", &self.shoe)
            .field("rules", &self.rules.name())
            .field("seats", &self.seats.iter().map(|s| s.player.seat()).collect::<Vec<_>>())
            .field("dealer", &self.dealer)
            .field("reshuffle_threshold", &self.reshuffle_threshold)
            .field("rounds_played", &self.rounds_played)
            .finish()
    }
}

impl Game {
    /// Create a game with the given house rules and shoe configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidShoeConfig`] for a zero-deck shoe and
    /// [`GameError::InvalidThreshold`] when the reshuffle threshold lies
    /// outside `(0, 1]`.
    pub fn new(
        rules: Box<dyn RuleSet>,
        num_decks: u8,
        reshuffle_threshold: f64,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        if !(reshuffle_threshold > 0.0 && reshuffle_threshold <= 1.0) {
            return Err(GameError::InvalidThreshold {
                threshold: reshuffle_threshold,
            });
        }
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let shoe = Shoe::new(num_decks, seed)?;
        Ok(Self {
            shoe,
            rules,
            seats: Vec::new(),
            dealer: Dealer::new(),
            reshuffle_threshold,
            rounds_played: 0,
        })
    }

    /// Seat a strategy at `seat`. Seats are unique within a game; players
    /// are kept in ascending seat order so deal order is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicateSeat`] if the seat is already taken.
    pub fn add_player(&mut self, seat: u8, strategy: Box<dyn Strategy>) -> Result<(), GameError> {
        if self.seats.iter().any(|s| s.player.seat() == seat) {
            return Err(GameError::DuplicateSeat { seat });
        }
        let idx = self
            .seats
            .iter()
            .position(|s| s.player.seat() > seat)
            .unwrap_or(self.seats.len());
        self.seats.insert(
            idx,
            Seat {
                player: Player::new(seat),
                strategy,
            },
        );
        Ok(())
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Play `rounds` rounds, optionally emitting a [`RoundRecord`] per
    /// round (plus a closing [`GameSummary`]) to `sink`. Returns the final
    /// profit-per-dollar per seat, the externally observable result.
    ///
    /// # Errors
    ///
    /// Configuration and contract violations abort the game:
    /// [`GameError::NoPlayers`], [`GameError::InvalidBet`],
    /// [`GameError::IllegalAction`], [`GameError::EmptyShoe`], and sink
    /// I/O failures.
    pub fn play<'s>(
        &mut self,
        rounds: u64,
        mut sink: Option<&mut (dyn RecordSink + 's)>,
    ) -> Result<BTreeMap<u8, f64>, GameError> {
        if self.seats.is_empty() {
            return Err(GameError::NoPlayers);
        }
        for _ in 0..rounds {
            self.play_round(sink.as_deref_mut())?;
        }
        if let Some(s) = sink.as_deref_mut() {
            s.write_summary(&self.summary())?;
        }
        Ok(self
            .seats
            .iter()
            .map(|s| (s.player.seat(), s.player.profit_per_dollar()))
            .collect())
    }

    /// Whole-game totals for every seat, in seat order.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            rounds: self.rounds_played,
            seats: self
                .seats
                .iter()
                .map(|s| SeatSummary {
                    seat: s.player.seat(),
                    strategy: s.strategy.name().to_string(),
                    game_net: s.player.game_net(),
                    total_wagered: s.player.total_wagered(),
                    profit_per_dollar: s.player.profit_per_dollar(),
                })
                .collect(),
        }
    }

    fn play_round<'s>(&mut self, sink: Option<&mut (dyn RecordSink + 's)>) -> Result<(), GameError> {
        // Round boundary: reshuffle before any bet is taken.
        if self.shoe.needs_reshuffle(self.reshuffle_threshold) {
            self.shoe.reshuffle();
            for seat in &mut self.seats {
                seat.strategy.observe_shuffle();
            }
        }
        let penetration_at_deal = self.shoe.penetration();

        self.bet_phase()?;
        self.deal_initial()?;
        self.player_turns()?;
        self.dealer_turn()?;
        self.settle();

        self.rounds_played += 1;
        if let Some(s) = sink {
            s.write_round(&self.round_record(penetration_at_deal))?;
        }
        Ok(())
    }

    /// BET: ask every strategy for a wager, rejecting non-positive bets.
    fn bet_phase(&mut self) -> Result<(), GameError> {
        let num_decks = self.shoe.num_decks();
        let penetration = self.shoe.penetration();
        for seat in &mut self.seats {
            seat.player.reset_for_round();
            let ctx = BetContext {
                seat: seat.player.seat(),
                num_decks,
                penetration,
                game_net: seat.player.game_net(),
            };
            let bet = seat.strategy.advise_bet(&ctx);
            if bet == 0 {
                return Err(GameError::InvalidBet {
                    seat: seat.player.seat(),
                    amount: bet,
                });
            }
            seat.player.place_bet(bet);
        }
        self.dealer.reset_for_round();
        Ok(())
    }

    /// DEAL_INITIAL: two cards per seat in ascending seat order, then the
    /// dealer's upcard and hole card. Only the hole card stays unobserved.
    fn deal_initial(&mut self) -> Result<(), GameError> {
        for i in 0..self.seats.len() {
            for _ in 0..2 {
                let card = self.shoe.draw()?;
                self.seats[i].player.hand_mut().add_card(card);
                self.broadcast_card(card);
            }
        }
        let upcard = self.shoe.draw()?;
        self.dealer.add_card(upcard);
        self.broadcast_card(upcard);
        let hole = self.shoe.draw()?;
        self.dealer.add_card(hole);
        Ok(())
    }

    /// PLAYER_TURNS: run the option/advice loop per seat. A natural skips
    /// its turn entirely; an action outside the legal set aborts the game.
    fn player_turns(&mut self) -> Result<(), GameError> {
        let num_decks = self.shoe.num_decks();
        let dealer_upcard = self
            .dealer
            .upcard()
            .expect("initial deal gives the dealer an upcard");
        for i in 0..self.seats.len() {
            if self.seats[i].player.hand().is_blackjack() {
                continue;
            }
            loop {
                let options = self.rules.player_options(self.seats[i].player.hand());
                if options.is_empty() {
                    break;
                }
                let penetration = self.shoe.penetration();
                let seat = &mut self.seats[i];
                let ctx = PlayContext {
                    hand: seat.player.hand(),
                    dealer_upcard,
                    num_decks,
                    penetration,
                };
                let action = seat.strategy.advise_play(&ctx, &options);
                if !options.contains(&action) {
                    return Err(GameError::IllegalAction {
                        seat: seat.player.seat(),
                        action,
                    });
                }
                match action {
                    Action::Stand => break,
                    Action::Hit => {
                        let card = self.shoe.draw()?;
                        self.seats[i].player.hand_mut().add_card(card);
                        self.broadcast_card(card);
                        if self.seats[i].player.hand().is_bust() {
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// DEALER_TURN: the dealer plays only when some hand is still live.
    /// Settlement of busts and naturals does not depend on the dealer's
    /// final total (the natural-vs-natural push is checked against the
    /// two-card dealer hand either way), so the hole card stays face-down
    /// when every hand has already resolved.
    fn dealer_turn(&mut self) -> Result<(), GameError> {
        let any_live = self
            .seats
            .iter()
            .any(|s| !s.player.hand().is_bust() && !s.player.hand().is_blackjack());
        if !any_live {
            return Ok(());
        }
        let hole = self
            .dealer
            .hole_card()
            .expect("initial deal gives the dealer a hole card");
        self.broadcast_card(hole);
        let drawn = self.dealer.play(&*self.rules, &mut self.shoe)?;
        for card in drawn {
            self.broadcast_card(card);
        }
        Ok(())
    }

    /// SETTLE: ruleset payout per seat, accumulated into round and game
    /// totals.
    fn settle(&mut self) {
        for seat in &mut self.seats {
            let net = self
                .rules
                .payout(seat.player.hand(), self.dealer.hand(), seat.player.bet());
            seat.player.settle(net);
        }
    }

    fn round_record(&self, penetration_at_deal: f64) -> RoundRecord {
        RoundRecord {
            round: self.rounds_played,
            ruleset: self.rules.name().to_string(),
            decks: self.shoe.num_decks(),
            reshuffle_threshold: self.reshuffle_threshold,
            penetration: penetration_at_deal,
            seats: self
                .seats
                .iter()
                .map(|s| SeatRoundResult {
                    seat: s.player.seat(),
                    strategy: s.strategy.name().to_string(),
                    bet: s.player.bet(),
                    round_net: s.player.round_net(),
                    game_net: s.player.game_net(),
                    profit_per_dollar: s.player.profit_per_dollar(),
                })
                .collect(),
            ts: None,
        }
    }

    /// Every face-up card is surfaced to every strategy, in deal order.
    fn broadcast_card(&mut self, card: Card) {
        for seat in &mut self.seats {
            seat.strategy.observe_card(card);
        }
    }
}

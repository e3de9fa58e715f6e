//! Round management

use std::collections::VecDeque;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    Award, Card, ConfigError, Deck, Event, GameConfig, Move, PlayerError, RoundError, Seat, Table,
};

/// A move applied during a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: String,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Everything that happened in a round, for the game record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// The cards dealt face-up at the start of the round.
    pub table: Vec<Card>,
    /// Every applied move, in order.
    pub plays: Vec<Play>,
    /// Points awarded when the round was scored.
    pub awards: Vec<Award>,
    /// Cards left on the table when the deck ran out. Nobody scores these.
    pub unclaimed: Vec<Card>,
}

/// The state visible to a particular player.
#[derive(Debug)]
pub struct PlayerState<'a> {
    /// The player who has access to this state.
    pub name: &'a str,
    /// The player's hand.
    pub hand: &'a [Card],
    /// The cards on the table.
    pub table: &'a [Card],
    /// Cards left in the deck.
    pub deck: usize,
}

/// The main state machine for a round.
///
/// A round begins with a deal of face-up cards to the table, followed by a
/// deal of one hand to every player. Players then take turns, each playing one
/// card per turn, until every hand is empty. The first player is then rotated
/// to the end of the turn order, and another hand is dealt. The round is over
/// once the deck runs out and the last hand has been played.
///
/// ## State management
///
/// The player expected to move next is always known, and may be obtained via
/// [`next_turn`](`Round::next_turn`). Moves are applied with
/// [`apply_move`](`Round::apply_move`). A move that doesn't fit the hand or
/// table is rejected with a [`PlayerError`], and leaves the state unchanged.
///
/// ## Events
///
/// Deals, turns and moves are reported as [`Event`]s, stored in a queue which
/// may be drained using [`drain_events`](`Round::drain_events`).
#[derive(Debug)]
pub struct Round {
    hand_size: usize,
    board_size: usize,
    deck: Deck,
    table: Table,
    seats: Vec<Seat>,
    next: Option<usize>,
    events: VecDeque<Event>,
    record: RoundRecord,
}

impl Round {
    /// Creates a new [`Round`] for the seats, in turn order. Nothing is dealt
    /// until the round is started.
    pub fn new(config: &GameConfig, seats: Vec<Seat>) -> Result<Self, ConfigError> {
        if seats.len() < 2 {
            return Err(ConfigError::TooFewPlayers(seats.len()));
        }
        Ok(Self {
            hand_size: config.hand_size,
            board_size: config.board_size,
            deck: Deck::default(),
            table: Table::default(),
            seats,
            next: None,
            events: VecDeque::new(),
            record: RoundRecord::default(),
        })
    }

    /// Starts a new round with a freshly shuffled deck.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck.refill();
        self.deck.shuffle(rng);
        self.deal();
    }

    /// Starts a new round, dealing from the given deck as is.
    #[cfg(test)]
    pub fn start_with_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.deal();
    }

    /// Returns the name of the player expected to move next, or None if the
    /// round is over.
    pub fn next_turn(&self) -> Option<&str> {
        self.next.map(|idx| self.seats[idx].name())
    }

    pub fn is_over(&self) -> bool {
        self.next.is_none()
    }

    #[cfg(test)]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The seats, in the current turn order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, name: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.name() == name)
    }

    /// The number of cards left to deal.
    #[cfg(test)]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Returns a bundle of state visible to the specified player.
    pub fn player_state(&self, name: &str) -> Option<PlayerState<'_>> {
        self.seat(name).map(|seat| PlayerState {
            name: seat.name(),
            hand: seat.hand(),
            table: self.table.cards(),
            deck: self.deck.len(),
        })
    }

    /// Drains every queued event.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    /// Takes the record of the round so far.
    pub fn take_record(&mut self) -> RoundRecord {
        std::mem::take(&mut self.record)
    }

    /// Records the round's awards, and the cards nobody captured.
    pub fn close(&mut self, awards: &[Award]) -> Vec<Card> {
        let unclaimed = self.table.sweep();
        self.record.awards = awards.to_vec();
        self.record.unclaimed = unclaimed.clone();
        unclaimed
    }

    /// Applies the move for the named player.
    pub fn apply_move(&mut self, name: &str, mv: Move) -> Result<(), RoundError> {
        let idx = self.next.ok_or(RoundError::RoundOver)?;
        if self.seats[idx].name() != name {
            return Err(match self.seat(name) {
                Some(_) => RoundError::OutOfTurn(self.seats[idx].name().to_string()),
                None => RoundError::UnknownPlayer(name.to_string()),
            });
        }
        if let Err(error) = self.validate(&self.seats[idx], &mv) {
            warn!(player = name, %mv, %error, "rejected move");
            self.events.push_back(Event::InvalidMove {
                player: name.to_string(),
                error: error.clone(),
            });
            return Err(error.into());
        }
        self.play(idx, mv)?;
        self.advance(idx + 1);
        Ok(())
    }

    fn validate(&self, seat: &Seat, mv: &Move) -> Result<(), PlayerError> {
        let hand_card = mv.hand_card();
        if !seat.holds(hand_card) {
            return Err(PlayerError::CardNotHeld(seat.name().to_string(), hand_card));
        }
        let Move::Take(take) = mv else {
            return Ok(());
        };
        if let Some(card) = take.board_cards().iter().find(|c| !self.table.contains(c)) {
            return Err(PlayerError::NotOnTable(*card));
        }
        if let Some((card, _)) = take
            .board_cards()
            .iter()
            .tuple_windows()
            .find(|(a, b)| a == b)
        {
            return Err(PlayerError::DuplicateBoardCard(*card));
        }
        let (rank, sum) = (hand_card.rank.value(), take.rank_sum());
        if rank != sum {
            return Err(PlayerError::RankMismatch {
                hand_card,
                rank,
                sum,
            });
        }
        Ok(())
    }

    fn play(&mut self, idx: usize, mv: Move) -> Result<(), PlayerError> {
        let seat = &mut self.seats[idx];
        seat.play(mv.hand_card())?;
        let player = seat.name().to_string();
        debug!(player = %player, %mv, "applied move");

        let mut scopa = false;
        match &mv {
            Move::Take(take) => {
                for card in take.board_cards() {
                    self.table
                        .remove(*card)
                        .ok_or(PlayerError::NotOnTable(*card))?;
                }
                seat.capture(take.captured());
                if self.table.is_empty() {
                    seat.add_scopa();
                    scopa = true;
                }
            }
            Move::Discard(card) => self.table.place(*card),
        }
        let hand = seat.hand().to_vec();

        self.record.plays.push(Play {
            player: player.clone(),
            mv: mv.clone(),
        });
        self.events.push_back(Event::MoveMade {
            player: player.clone(),
            mv,
        });
        if scopa {
            debug!(player = %player, "scopa");
            self.events.push_back(Event::Scopa {
                player: player.clone(),
            });
        }
        self.events.push_back(Event::PostMove { player, hand });
        Ok(())
    }

    /// Resets the seats and deals the table and first hand.
    fn deal(&mut self) {
        for seat in &mut self.seats {
            seat.reset();
        }
        self.table = Table::from(self.deck.take(self.board_size));
        self.record = RoundRecord {
            table: self.table.cards().to_vec(),
            ..RoundRecord::default()
        };
        debug!(table = %self.table.iter().join(" "), "dealt table");
        self.deal_hand();
    }

    /// Deals a hand to each player in turn order, one card at a time, until
    /// each has a full hand or the deck runs out.
    fn deal_hand(&mut self) {
        let dealer = self.seats[0].name().to_string();
        debug!(dealer = %dealer, deck = self.deck.len(), "dealing");
        self.events.push_back(Event::Dealing { dealer });
        for _ in 0..self.hand_size {
            for seat in &mut self.seats {
                if let Some(card) = self.deck.draw() {
                    seat.deal(card);
                }
            }
        }
        self.advance(0);
    }

    /// Passes the turn to the next player, starting from `start`, who still
    /// holds cards. When every hand is empty, rotates the turn order and deals
    /// another hand, or ends the round if the deck is empty.
    fn advance(&mut self, start: usize) {
        let n = self.seats.len();
        self.next = (0..n)
            .map(|i| (start + i) % n)
            .find(|&i| !self.seats[i].hand().is_empty());
        match self.next {
            Some(idx) => {
                let seat = &self.seats[idx];
                self.events.push_back(Event::TurnBegin {
                    player: seat.name().to_string(),
                    table: self.table.cards().to_vec(),
                    hand: seat.hand().to_vec(),
                });
            }
            None => {
                self.seats.rotate_left(1);
                if self.deck.is_empty() {
                    debug!(unclaimed = self.table.len(), "round over");
                } else {
                    self.deal_hand();
                }
            }
        }
    }
}

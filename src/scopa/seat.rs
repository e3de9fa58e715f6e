//! A player's place at the table.

use std::collections::BTreeSet;

use super::{Card, PlayerError};

/// The cards held and captured by a single named player.
///
/// The name identifies the player for turn order and scoring. Everything else
/// is cleared at the start of each round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    name: String,
    hand: Vec<Card>,
    captured: BTreeSet<Card>,
    coins: usize,
    scopas: u32,
}

impl Seat {
    /// Creates a new [`Seat`] with no cards.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            hand: vec![],
            captured: BTreeSet::new(),
            coins: 0,
            scopas: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cards in hand, in the order they were dealt.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn captured(&self) -> &BTreeSet<Card> {
        &self.captured
    }

    /// The number of coins among the captured cards.
    pub fn coins(&self) -> usize {
        self.coins
    }

    /// The number of times this player cleared the table this round.
    pub fn scopas(&self) -> u32 {
        self.scopas
    }

    /// Returns true if the player holds the card in hand.
    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Clears the hand, captured cards and scopa count for a new round.
    pub fn reset(&mut self) {
        self.hand.clear();
        self.captured.clear();
        self.coins = 0;
        self.scopas = 0;
    }

    pub fn deal(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Removes the card from the player's hand.
    pub fn play(&mut self, card: Card) -> Result<Card, PlayerError> {
        self.hand
            .iter()
            .position(|c| *c == card)
            .map(|idx| self.hand.remove(idx))
            .ok_or_else(|| PlayerError::CardNotHeld(self.name.clone(), card))
    }

    /// Adds cards to the captured pile.
    pub fn capture<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            if self.captured.insert(card) && card.is_coin() {
                self.coins += 1;
            }
        }
    }

    pub fn add_scopa(&mut self) {
        self.scopas += 1;
    }
}

//! The face-up cards in the middle of the table.

use delegate::delegate;

use super::Card;

/// The cards on the table, in the order they were placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    cards: Vec<Card>,
}

impl From<Vec<Card>> for Table {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl Table {
    delegate! {
        to self.cards {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn contains(&self, card: &Card) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, Card>;
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Places a card face-up on the table.
    pub fn place(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the matching card from the table.
    pub fn remove(&mut self, card: Card) -> Option<Card> {
        self.cards
            .iter()
            .position(|c| *c == card)
            .map(|idx| self.cards.remove(idx))
    }

    /// Clears the table, returning whatever was on it.
    pub fn sweep(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

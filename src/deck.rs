//! A deck of cards.

use std::collections::VecDeque;
use std::iter::FromIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// A deck of cards, drawn from the front.
#[derive(Debug, Clone)]
pub struct Deck<C> {
    cards: VecDeque<C>,
}

impl<C> FromIterator<C> for Deck<C> {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let cards = iter.into_iter().collect();
        Self { cards }
    }
}

impl<C> Deck<C> {
    /// The number of cards remaining in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if there are no cards left to draw.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffles the remaining cards with a uniform random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Draws the card at the front of the deck, if any remain.
    pub fn draw(&mut self) -> Option<C> {
        self.cards.pop_front()
    }

    /// Draws up to `n` cards from the front of the deck.
    pub fn take(&mut self, n: usize) -> Vec<C> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Restores the full, unshuffled set of cards.
    pub fn refill(&mut self)
    where
        Self: Default,
    {
        *self = Self::default();
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn deck() -> Deck<u8> {
        (1..=5).collect()
    }

    #[test]
    fn test_draws_from_front() {
        let mut deck = deck();
        assert_eq!(deck.draw(), Some(1));
        assert_eq!(deck.take(2), vec![2, 3]);
        assert_eq!(deck.take(10), vec![4, 5]);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
        assert!(deck.take(3).is_empty());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = deck();
        let mut b = deck();
        a.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
        b.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
        let a = a.take(5);
        assert_eq!(a, b.take(5));

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }
}

//! Legal move generation.

use std::collections::HashSet;

use itertools::Itertools;

use super::{Card, Move, StrategyError, Take};

/// The largest number of table cards captured together by a single hand card.
const MAX_COMBINATION: usize = 4;

/// Enumerates every legal move for `hand` against `table`.
///
/// A hand card that matches a table card of the same rank may only take that
/// card. Other hand cards may take any combination of two to four table cards
/// whose ranks sum to the hand card's rank. When nothing can be taken, each hand
/// card may be discarded instead.
///
/// The result is sorted, so it depends only on the cards given and not on
/// their order.
pub fn generate_candidate_moves(table: &[Card], hand: &[Card]) -> Result<Vec<Move>, StrategyError> {
    if hand.is_empty() {
        return Err(StrategyError::EmptyHand);
    }

    let mut moves = vec![];
    let mut single: HashSet<Card> = HashSet::with_capacity(hand.len());
    for &hand_card in hand {
        for &board_card in table.iter().filter(|c| c.rank == hand_card.rank) {
            moves.push(Move::Take(Take::from_nonempty(hand_card, vec![board_card])));
            single.insert(hand_card);
        }
    }

    let remaining: Vec<Card> = hand
        .iter()
        .filter(|c| !single.contains(c))
        .copied()
        .collect();
    if !remaining.is_empty() {
        for size in 2..=MAX_COMBINATION.min(table.len()) {
            for combo in table.iter().copied().combinations(size) {
                let sum: u8 = combo.iter().map(|c| c.rank.value()).sum();
                for &hand_card in remaining.iter().filter(|c| c.rank.value() == sum) {
                    moves.push(Move::Take(Take::from_nonempty(hand_card, combo.clone())));
                }
            }
        }
    }

    if moves.is_empty() {
        moves = hand.iter().map(|&card| Move::Discard(card)).collect();
    }
    moves.sort_unstable();
    Ok(moves)
}

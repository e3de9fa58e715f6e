//! Heuristic move selection.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{generate_candidate_moves, Card, ConfigError, Move, StrategyError, Take};

/// Weights for each heuristic that contributes to a move's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    /// The move clears the table.
    pub scopa: i32,
    /// The move captures the most table cards of any candidate.
    pub cards: i32,
    /// The move captures the most coins of any candidate.
    pub coins: i32,
    /// The move captures the seven of coins.
    pub seven_of_coins: i32,
    /// The move captures the highest prime card of any candidate.
    pub highest_primes: i32,
    /// Applied to the first discard of the highest rank.
    pub discard_highest: i32,
    /// Applied to the first discard of the lowest rank.
    pub discard_lowest: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            scopa: 2,
            cards: 1,
            coins: 1,
            seven_of_coins: 2,
            highest_primes: 2,
            discard_highest: 0,
            discard_lowest: 0,
        }
    }
}

/// The strategies that robots can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Default,
}

impl StrategyKind {
    /// Returns an array of all strategies.
    pub fn all() -> &'static [StrategyKind] {
        &[StrategyKind::Default]
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Default => "default",
        }
    }

    /// The weights used by this strategy.
    pub fn weights(self) -> Weights {
        match self {
            StrategyKind::Default => Weights::default(),
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Scores candidate moves with fixed [`Weights`], and picks the best.
///
/// Selection depends only on the table and hand given; the strategy holds no
/// state between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    weights: Weights,
}

impl Default for Strategy {
    fn default() -> Self {
        StrategyKind::default().into()
    }
}

impl From<StrategyKind> for Strategy {
    fn from(kind: StrategyKind) -> Self {
        Self::new(kind.weights())
    }
}

fn coin_count(take: &Take) -> usize {
    take.captured().filter(|c| c.is_coin()).count()
}

fn best_prime(take: &Take) -> u8 {
    take.captured()
        .map(|c| c.rank.prime_points())
        .max()
        .unwrap_or_default()
}

impl Strategy {
    /// Creates a new [`Strategy`].
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Chooses a move for `hand` against `table`. Ties go to the earliest
    /// candidate.
    pub fn select_move(&self, table: &[Card], hand: &[Card]) -> Result<Move, StrategyError> {
        let mut moves = generate_candidate_moves(table, hand)?;
        if moves.len() == 1 {
            return Ok(moves.remove(0));
        }
        let scores = self.score_moves(&moves, table);
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        debug!(
            candidates = moves.len(),
            score = scores[best],
            chosen = %moves[best],
            "selected move"
        );
        Ok(moves.swap_remove(best))
    }

    /// Scores each candidate. The candidates are expected to be all takes or
    /// all discards, as produced by [`generate_candidate_moves`].
    pub fn score_moves(&self, moves: &[Move], table: &[Card]) -> Vec<i32> {
        match moves.first() {
            Some(Move::Take(_)) => self.score_takes(moves, table),
            Some(Move::Discard(_)) => self.score_discards(moves),
            None => vec![],
        }
    }

    fn score_takes(&self, moves: &[Move], table: &[Card]) -> Vec<i32> {
        let w = &self.weights;
        let takes = || {
            moves.iter().filter_map(|m| match m {
                Move::Take(take) => Some(take),
                Move::Discard(_) => None,
            })
        };
        let most_cards = takes()
            .map(|t| t.board_cards().len())
            .max()
            .unwrap_or_default()
            .max(1);
        let most_coins = takes().map(coin_count).max().unwrap_or_default();
        let highest_prime = takes().map(best_prime).max().unwrap_or_default();

        moves
            .iter()
            .map(|m| {
                let Move::Take(take) = m else {
                    return 0;
                };
                let mut score = 0;
                let taken = take.board_cards().len();
                if taken == table.len() {
                    score += w.scopa;
                }
                if take.captured().any(|c| c == Card::SEVEN_OF_COINS) {
                    score += w.seven_of_coins;
                }
                if most_cards > 1 && taken == most_cards {
                    score += w.cards;
                }
                if most_coins > 0 && coin_count(take) == most_coins {
                    score += w.coins;
                }
                if best_prime(take) == highest_prime {
                    score += w.highest_primes;
                }
                score
            })
            .collect()
    }

    fn score_discards(&self, moves: &[Move]) -> Vec<i32> {
        let mut scores = vec![0; moves.len()];
        let rank = |i: usize| moves[i].hand_card().rank;
        let (mut lowest, mut highest) = (0, 0);
        for i in 1..moves.len() {
            if rank(i) < rank(lowest) {
                lowest = i;
            }
            if rank(i) > rank(highest) {
                highest = i;
            }
        }
        scores[lowest] += self.weights.discard_lowest;
        scores[highest] += self.weights.discard_highest;
        scores
    }
}

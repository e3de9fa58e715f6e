//! Round scoring.
//!
//! At the end of each round, every player scores one point per scopa. Four more
//! points go to the players with the most captured cards, the most captured
//! coins, the seven of coins, and the best prime score. Ties in a category go
//! to whichever tied player comes first in turn order.

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, Seat, Suit};

/// A scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    Scopa,
    MostCards,
    MostCoins,
    SevenOfCoins,
    Primes,
}

impl Display for Bonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Bonus::Scopa => "scopas",
            Bonus::MostCards => "most cards",
            Bonus::MostCoins => "most coins",
            Bonus::SevenOfCoins => "the seven of coins",
            Bonus::Primes => "highest prime score",
        })
    }
}

/// Points awarded to a player at the end of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub player: String,
    pub bonus: Bonus,
    pub points: u32,
}

impl Award {
    fn new(seat: &Seat, bonus: Bonus, points: u32) -> Self {
        Self {
            player: seat.name().to_string(),
            bonus,
            points,
        }
    }
}

/// Sums the best prime value captured in each suit. A suit with no captured
/// cards contributes nothing.
pub fn prime_score(captured: &BTreeSet<Card>) -> u32 {
    Suit::all_suits()
        .iter()
        .filter_map(|&suit| {
            captured
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank.prime_points())
                .max()
        })
        .map(u32::from)
        .sum()
}

/// Returns the first seat with the greatest key.
fn first_max<K: Ord, F: Fn(&Seat) -> K>(seats: &[Seat], key: F) -> Option<&Seat> {
    let mut best: Option<(&Seat, K)> = None;
    for seat in seats {
        let k = key(seat);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((seat, k));
        }
    }
    best.map(|(seat, _)| seat)
}

/// Computes the awards for a finished round, in turn order.
pub fn score_round(seats: &[Seat]) -> Vec<Award> {
    let mut awards: Vec<Award> = seats
        .iter()
        .filter(|s| s.scopas() > 0)
        .map(|s| Award::new(s, Bonus::Scopa, s.scopas()))
        .collect();
    if let Some(seat) = first_max(seats, |s| s.captured().len()) {
        awards.push(Award::new(seat, Bonus::MostCards, 1));
    }
    if let Some(seat) = first_max(seats, Seat::coins) {
        awards.push(Award::new(seat, Bonus::MostCoins, 1));
    }
    if let Some(seat) = seats
        .iter()
        .find(|s| s.captured().contains(&Card::SEVEN_OF_COINS))
    {
        awards.push(Award::new(seat, Bonus::SevenOfCoins, 1));
    }
    if let Some(seat) = first_max(seats, |s| prime_score(s.captured())) {
        awards.push(Award::new(seat, Bonus::Primes, 1));
    }
    awards
}

/// Cumulative scores, kept in the order players joined the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    scores: Vec<(String, u32)>,
}

impl Scoreboard {
    /// Creates a new [`Scoreboard`] with every player at zero.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scores = names.into_iter().map(|n| (n.into(), 0)).collect();
        Self { scores }
    }

    /// Returns the player's score.
    #[cfg(test)]
    pub fn get(&self, name: &str) -> u32 {
        self.scores
            .iter()
            .find_map(|(n, s)| (n == name).then_some(*s))
            .unwrap_or_default()
    }

    pub fn add(&mut self, name: &str, points: u32) {
        match self.scores.iter_mut().find(|(n, _)| n == name) {
            Some((_, score)) => *score += points,
            None => self.scores.push((name.to_string(), points)),
        }
    }

    pub fn apply(&mut self, awards: &[Award]) {
        for award in awards {
            self.add(&award.player, award.points);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// Returns every player tied at the top score, if that score has reached
    /// the target.
    pub fn winners(&self, target: u32) -> Option<Vec<String>> {
        let best = self.scores.iter().map(|(_, s)| *s).max()?;
        if best < target {
            return None;
        }
        let winners = self
            .scores
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(n, _)| n.clone())
            .collect();
        Some(winners)
    }
}

impl Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scores = self.iter().map(|(n, s)| format!("{n}: {s}")).join(", ");
        f.write_str(&scores)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn seat(name: &str, captured: &str, scopas: u32) -> Seat {
        let mut seat = Seat::new(name);
        seat.capture(cards(captured));
        for _ in 0..scopas {
            seat.add_scopa();
        }
        seat
    }

    fn bonus_winner(awards: &[Award], bonus: Bonus) -> Vec<&str> {
        awards
            .iter()
            .filter(|a| a.bonus == bonus)
            .map(|a| a.player.as_str())
            .collect()
    }

    #[test]
    fn test_prime_score() {
        let captured: BTreeSet<_> = cards("7CO ACO 6CU KSW").into_iter().collect();
        // Coins 21, cups 18, swords 10, clubs 0.
        assert_eq!(prime_score(&captured), 49);
        assert_eq!(prime_score(&BTreeSet::new()), 0);
    }

    #[test]
    fn test_each_bonus_goes_to_one_player() {
        let seats = [
            seat("Kenny", "7CO 2CU", 1),
            seat("Brenna", "ACU 2SW 3SW 4SW 5SW 3CL", 0),
            seat("Andreas", "ACO 2CO 3CO KCU", 2),
        ];
        let awards = score_round(&seats);
        assert_eq!(bonus_winner(&awards, Bonus::Scopa), vec!["Kenny", "Andreas"]);
        assert_eq!(bonus_winner(&awards, Bonus::MostCards), vec!["Brenna"]);
        assert_eq!(bonus_winner(&awards, Bonus::MostCoins), vec!["Andreas"]);
        assert_eq!(bonus_winner(&awards, Bonus::SevenOfCoins), vec!["Kenny"]);
        // Brenna: cups 16 + swords 15 + clubs 13.
        assert_eq!(bonus_winner(&awards, Bonus::Primes), vec!["Brenna"]);

        let fixed: u32 = awards
            .iter()
            .filter(|a| a.bonus != Bonus::Scopa)
            .map(|a| a.points)
            .sum();
        assert_eq!(fixed, 4);

        let mut board = Scoreboard::new(["Kenny", "Brenna", "Andreas"]);
        board.apply(&awards);
        assert_eq!(board.get("Kenny"), 2);
        assert_eq!(board.get("Brenna"), 2);
        assert_eq!(board.get("Andreas"), 3);
    }

    #[test]
    fn test_ties_go_to_first_player() {
        let seats = [seat("A", "2CU 3CU", 0), seat("B", "2SW 3SW", 0)];
        let awards = score_round(&seats);
        assert_eq!(bonus_winner(&awards, Bonus::MostCards), vec!["A"]);
        assert_eq!(bonus_winner(&awards, Bonus::MostCoins), vec!["A"]);
        assert_eq!(bonus_winner(&awards, Bonus::Primes), vec!["A"]);
        assert!(bonus_winner(&awards, Bonus::SevenOfCoins).is_empty());
    }

    #[test]
    fn test_winners() {
        let mut board = Scoreboard::new(["A", "B"]);
        board.add("A", 10);
        board.add("B", 12);
        assert_eq!(board.winners(11), Some(vec!["B".to_string()]));

        let mut board = Scoreboard::new(["A", "B"]);
        board.add("A", 11);
        board.add("B", 11);
        assert_eq!(board.winners(11), Some(vec!["A".to_string(), "B".to_string()]));

        let mut board = Scoreboard::new(["A", "B"]);
        board.add("A", 10);
        assert_eq!(board.winners(11), None);
        assert_eq!(board.to_string(), "A: 10, B: 0");
    }
}

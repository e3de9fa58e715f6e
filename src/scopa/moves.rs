//! Moves

use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, MoveError};

/// Types of moves that a player can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    /// Capture table cards with a hand card.
    Take,
    /// Place a hand card on the table.
    Discard,
}

impl Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MoveType::Take => "TAKE",
            MoveType::Discard => "DISCARD",
        })
    }
}

impl FromStr for MoveType {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" | "t" => Ok(MoveType::Take),
            "D" | "d" => Ok(MoveType::Discard),
            _ => Err(MoveError::UnknownMoveType(s.to_string())),
        }
    }
}

/// A capture of one or more table cards.
///
/// The board cards are never empty, and are kept in card order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Take {
    hand_card: Card,
    board_cards: Vec<Card>,
}

impl Take {
    /// Creates a new [`Take`].
    pub fn new(hand_card: Card, board_cards: Vec<Card>) -> Result<Self, MoveError> {
        if board_cards.is_empty() {
            Err(MoveError::TakeWithoutBoardCards)
        } else {
            Ok(Self::from_nonempty(hand_card, board_cards))
        }
    }

    /// Creates a [`Take`] from board cards that are known to be non-empty.
    pub(super) fn from_nonempty(hand_card: Card, mut board_cards: Vec<Card>) -> Self {
        debug_assert!(!board_cards.is_empty());
        board_cards.sort_unstable();
        Self {
            hand_card,
            board_cards,
        }
    }

    /// The card played from the hand.
    #[cfg(test)]
    pub fn hand_card(&self) -> Card {
        self.hand_card
    }

    /// The table cards being captured.
    pub fn board_cards(&self) -> &[Card] {
        &self.board_cards
    }

    /// Sum of the board card rank values.
    pub fn rank_sum(&self) -> u8 {
        self.board_cards.iter().map(|c| c.rank.value()).sum()
    }

    /// Every card that ends up in the player's captured pile: the board cards
    /// and the hand card.
    pub fn captured(&self) -> impl Iterator<Item = Card> + '_ {
        self.board_cards
            .iter()
            .copied()
            .chain(std::iter::once(self.hand_card))
    }
}

/// A move made by a player on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Take(Take),
    Discard(Card),
}

impl Move {
    /// Creates a new [`Move`], checking that the board cards fit the move type.
    pub fn new(kind: MoveType, hand_card: Card, board_cards: Vec<Card>) -> Result<Self, MoveError> {
        match kind {
            MoveType::Take => Take::new(hand_card, board_cards).map(Move::Take),
            MoveType::Discard if board_cards.is_empty() => Ok(Move::Discard(hand_card)),
            MoveType::Discard => Err(MoveError::DiscardWithBoardCards),
        }
    }

    /// Shorthand for a checked [`Move::Take`].
    #[cfg(test)]
    pub fn take(hand_card: Card, board_cards: Vec<Card>) -> Result<Self, MoveError> {
        Self::new(MoveType::Take, hand_card, board_cards)
    }

    pub fn kind(&self) -> MoveType {
        match self {
            Move::Take(_) => MoveType::Take,
            Move::Discard(_) => MoveType::Discard,
        }
    }

    /// The card played from the hand.
    pub fn hand_card(&self) -> Card {
        match self {
            Move::Take(take) => take.hand_card,
            Move::Discard(card) => *card,
        }
    }

    /// The table cards being captured, empty for a discard.
    pub fn board_cards(&self) -> &[Card] {
        match self {
            Move::Take(take) => take.board_cards(),
            Move::Discard(_) => &[],
        }
    }

    /// The move text, as accepted by [`Move::from_str`].
    pub fn code(&self) -> String {
        let kind = match self.kind() {
            MoveType::Take => "T",
            MoveType::Discard => "D",
        };
        std::iter::once(kind.to_string())
            .chain(std::iter::once(self.hand_card().code()))
            .chain(self.board_cards().iter().map(|c| c.code()))
            .join(",")
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.hand_card())?;
        if let Move::Take(take) = self {
            write!(f, " -> {}", take.board_cards.iter().join(", "))?;
        }
        Ok(())
    }
}

/// Parses the move text `<T|D>,<card>[,<card>...]`, where the first card is
/// played from the hand and the rest are taken from the table.
impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoveError::Empty);
        }
        let mut parts = s.split(',').map(str::trim);
        let kind = parts.next().unwrap_or_default().parse::<MoveType>()?;
        let hand_card = parts
            .next()
            .ok_or(MoveError::MissingHandCard)?
            .parse::<Card>()?;
        let board_cards = parts.map(Card::from_str).collect::<Result<Vec<_>, _>>()?;
        Move::new(kind, hand_card, board_cards)
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Move::from_str(&s).map_err(serde::de::Error::custom)
    }
}

//! The Italian 40-card deck.

use std::convert::TryFrom;
use std::{fmt::Display, str::FromStr};

use ansi_term::{ANSIString, Colour};
use serde::{Deserialize, Serialize};

use super::MoveError;
use crate::deck;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Coins,
    Cups,
    Swords,
    Clubs,
}

impl Suit {
    /// Returns an array of all suits.
    pub fn all_suits() -> &'static [Suit] {
        static SUITS: [Suit; 4] = [Suit::Coins, Suit::Cups, Suit::Swords, Suit::Clubs];
        &SUITS
    }

    /// The suit token used in move text.
    pub fn code(self) -> &'static str {
        match self {
            Suit::Coins => "CO",
            Suit::Cups => "CU",
            Suit::Swords => "SW",
            Suit::Clubs => "CL",
        }
    }

    fn colour(self) -> Colour {
        match self {
            Suit::Coins => Colour::Yellow,
            Suit::Cups => Colour::Red,
            Suit::Swords => Colour::Blue,
            Suit::Clubs => Colour::Green,
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Suit::Coins => "\u{25ef}",
            Suit::Cups => "\u{1F377}",
            Suit::Swords => "\u{2694}",
            Suit::Clubs => "\u{2663}",
        })
    }
}

impl FromStr for Suit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "co" => Suit::Coins,
            "cu" => Suit::Cups,
            "s" | "sw" => Suit::Swords,
            "cl" => Suit::Clubs,
            _ => return Err(()),
        })
    }
}

/// Card rank. Jack, Queen and King take the values 8, 9 and 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Returns an array of all ranks, in ascending order.
    pub fn all_ranks() -> &'static [Rank] {
        static RANKS: [Rank; 10] = [
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
        ];
        &RANKS
    }

    /// The numeric value used when summing ranks for a capture.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Points this rank is worth when scoring primes.
    pub fn prime_points(self) -> u8 {
        match self {
            Rank::Ace => 16,
            Rank::Two => 12,
            Rank::Three => 13,
            Rank::Four => 14,
            Rank::Five => 15,
            Rank::Six => 18,
            Rank::Seven => 21,
            Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_uppercase() {
            'A' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            _ => return Err(()),
        })
    }
}

/// A scopa card. Cards are ordered by rank, then suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// Card rank.
    pub rank: Rank,
    /// Card suit.
    pub suit: Suit,
}

impl Card {
    /// The seven of coins, worth a point on its own.
    pub const SEVEN_OF_COINS: Card = Card::new(Rank::Seven, Suit::Coins);

    /// Creates a new [`Card`].
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns true for cards of the coins suit.
    pub fn is_coin(self) -> bool {
        self.suit == Suit::Coins
    }

    /// The text code for this card, as accepted by [`Card::from_str`].
    pub fn code(self) -> String {
        format!("{}{}", self.rank, self.suit.code())
    }

    /// Returns a string representation of the card, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        self.suit.colour().paint(self.to_string())
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidCard(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let rank = chars
            .next()
            .and_then(|c| Rank::try_from(c).ok())
            .ok_or_else(invalid)?;
        let suit = Suit::from_str(chars.as_str()).map_err(|()| invalid())?;
        Ok(Card { rank, suit })
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A scopa deck.
pub type Deck = deck::Deck<Card>;
impl Default for Deck {
    fn default() -> Self {
        itertools::iproduct!(Rank::all_ranks(), Suit::all_suits())
            .map(|(&rank, &suit)| Card { rank, suit })
            .collect()
    }
}

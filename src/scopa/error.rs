//! Error types

use super::Card;

/// A move could not be parsed or constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("empty move")]
    Empty,

    #[error("unsupported move type {0:?}, expected T or D")]
    UnknownMoveType(String),

    #[error("move is missing the hand card")]
    MissingHandCard,

    #[error("invalid card {0:?}")]
    InvalidCard(String),

    /// A take must capture at least one card from the table.
    #[error("a take needs at least one board card")]
    TakeWithoutBoardCards,

    /// A discard places the hand card on the table, and captures nothing.
    #[error("a discard cannot name board cards")]
    DiscardWithBoardCards,
}

/// The player proposed a move that does not fit the current hand and table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The player doesn't actually hold the card they attempted to play.
    #[error("{1} not in {0}'s hand")]
    CardNotHeld(String, Card),

    #[error("{0} is not on the board")]
    NotOnTable(Card),

    #[error("{0} is named more than once")]
    DuplicateBoardCard(Card),

    /// The board cards named in a take must sum to the rank of the hand card.
    #[error("board card ranks add up to {sum}, not {hand_card}'s {rank}")]
    RankMismatch { hand_card: Card, rank: u8, sum: u8 },
}

#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("round over")]
    RoundOver,
    #[error("game over")]
    GameOver,
    #[error("expected {0} to move")]
    OutOfTurn(String),
    #[error("no player named {0}")]
    UnknownPlayer(String),
    #[error(transparent)]
    Player(#[from] PlayerError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("cannot make a move with an empty hand")]
    EmptyHand,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("number of players must be at least 2, got {0}")]
    TooFewPlayers(usize),
    #[error("duplicate player name {0:?}")]
    DuplicatePlayer(String),
    #[error("player name cannot be empty")]
    EmptyPlayerName,
    #[error("strategy {0:?} not implemented")]
    UnknownStrategy(String),
    #[error("unsupported input mode {0:?}, expected human or robot")]
    UnknownInputMode(String),
    #[error("hand size must be at least 1")]
    InvalidHandSize,
    #[error("board of {0} cards does not fit in the deck")]
    InvalidBoardSize(usize),
}

//! The game of scopa.

mod candidates;
mod card;
mod config;
mod error;
mod game;
mod moves;
mod player;
mod presenter;
mod round;
mod score;
mod seat;
mod strategy;
mod table;

use anyhow::Context;
use rand::Rng;

pub use self::candidates::generate_candidate_moves;
pub use self::card::{Card, Deck, Suit};
pub use self::config::{validate_roster, Controller, GameConfig, PlayerSpec, Settings};
pub use self::error::{ConfigError, MoveError, PlayerError, RoundError, StrategyError};
pub use self::game::Game;
pub use self::moves::{Move, Take};
pub use self::player::{Console, Player, Players, Robot};
pub use self::presenter::{Presenter, Text, Tracing};
pub use self::round::{PlayerState, Round, RoundRecord};
pub use self::score::{score_round, Award, Scoreboard};
pub use self::seat::Seat;
pub use self::strategy::{Strategy, StrategyKind};
pub use self::table::Table;

/// An event that occurs during the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new round is starting.
    NewRound { round: u32, scores: Scoreboard },
    /// The dealer is about to deal a hand to every player.
    Dealing { dealer: String },
    /// It is this player's turn to move.
    TurnBegin {
        player: String,
        table: Vec<Card>,
        hand: Vec<Card>,
    },
    /// The player's move was rejected.
    InvalidMove { player: String, error: PlayerError },
    MoveMade { player: String, mv: Move },
    /// The player cleared the table.
    Scopa { player: String },
    /// The player's hand after their move.
    PostMove { player: String, hand: Vec<Card> },
    /// The round is over, and points have been awarded.
    RoundScored {
        awards: Vec<Award>,
        unclaimed: Vec<Card>,
        scores: Scoreboard,
    },
    /// The game is over.
    GameOver {
        winners: Vec<String>,
        scores: Scoreboard,
    },
}

/// Runs the game to completion, returning the winners.
///
/// Every event is handed to the presenter as it happens. A rejected move is
/// retried, if the player asks for it, and otherwise ends the game with an
/// error.
pub fn play<R: Rng>(
    game: &mut Game<R>,
    players: &Players,
    presenter: &dyn Presenter,
) -> anyhow::Result<Vec<String>> {
    loop {
        while let Some(event) = game.pop_event() {
            presenter.present(&event);
        }
        let Some(name) = game.next_turn().map(str::to_string) else {
            break;
        };
        let player = players
            .get(&name)
            .with_context(|| format!("no player registered for {name}"))?;
        let state = game
            .player_state(&name)
            .with_context(|| format!("{name} is not seated"))?;
        let mv = player
            .choose_move(&state)
            .with_context(|| format!("{name} failed to choose a move"))?;
        match game.apply_move(&name, mv) {
            Err(RoundError::Player(err)) if player.handle_error(&err) => continue,
            Err(err) => return Err(err).with_context(|| format!("fatal move by {name}")),
            Ok(()) => (),
        }
    }
    Ok(game.winners().unwrap_or_default().to_vec())
}

//! Move sources.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Move, PlayerError, PlayerState};

mod console;
mod robot;
#[cfg(test)]
mod scripted;
pub use console::Console;
pub use robot::Robot;
#[cfg(test)]
pub use scripted::ScriptedPlayer;

/// A trait that chooses moves on behalf of a scopa player.
pub trait Player {
    /// Chooses a move, given the player's view of the round. The hand is
    /// never empty.
    ///
    /// An error here is fatal to the game, e.g. the console input was closed.
    fn choose_move(&self, state: &PlayerState) -> anyhow::Result<Move>;

    /// Indicates that the player has made an invalid move.
    ///
    /// The implementation may return true, if a retry is desired. Otherwise,
    /// the invalid move will be converted into a fatal error.
    fn handle_error(&self, err: &PlayerError) -> bool;
}

/// A collection of players, indexed by name.
#[derive(Default)]
pub struct Players(HashMap<String, Arc<dyn Player>>);

impl Players {
    pub fn insert<S: Into<String>>(&mut self, name: S, player: Arc<dyn Player>) {
        self.0.insert(name.into(), player);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Player>> {
        self.0.get(name)
    }
}

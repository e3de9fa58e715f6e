//! A scripted player, for testing.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use super::{Move, Player, PlayerError, PlayerState, Robot};

/// Plays scripted moves in order, then falls back to a robot.
#[derive(Debug, Default)]
pub struct ScriptedPlayer {
    moves: Mutex<VecDeque<Move>>,
    retries: bool,
    robot: Robot,
}

impl Player for ScriptedPlayer {
    fn choose_move(&self, state: &PlayerState) -> anyhow::Result<Move> {
        let scripted = self.moves.lock().unwrap().pop_front();
        match scripted {
            Some(mv) => Ok(mv),
            None => self.robot.choose_move(state),
        }
    }

    fn handle_error(&self, _: &PlayerError) -> bool {
        self.retries
    }
}

impl ScriptedPlayer {
    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }

    /// Queues up a move, in move text.
    pub fn plays(self, mv: &str) -> Self {
        let mv = Move::from_str(mv).unwrap();
        self.moves.lock().unwrap().push_back(mv);
        self
    }

    /// Asks for a retry after an invalid move.
    pub fn retries(mut self) -> Self {
        self.retries = true;
        self
    }
}

//! Robot player

use std::sync::Arc;

use tracing::debug;

use super::{Move, Player, PlayerError, PlayerState};
use crate::scopa::Strategy;

/// A player whose moves are chosen by a [`Strategy`].
#[derive(Debug, Default)]
pub struct Robot {
    strategy: Strategy,
}

impl Robot {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }
}

impl Player for Robot {
    fn choose_move(&self, state: &PlayerState) -> anyhow::Result<Move> {
        let mv = self.strategy.select_move(state.table, state.hand)?;
        debug!(player = state.name, %mv, "robot move");
        Ok(mv)
    }

    fn handle_error(&self, _: &PlayerError) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scopa::Card;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn test_robot_uses_strategy() {
        let (table, hand) = (cards("3CU 4CL 2SW"), cards("7CO KSW"));
        let state = PlayerState {
            name: "Brenna",
            hand: &hand,
            table: &table,
            deck: 0,
        };
        let robot = Robot::default();
        assert_eq!(robot.choose_move(&state).unwrap().code(), "T,7CO,3CU,4CL");

        let state = PlayerState { hand: &[], ..state };
        assert!(robot.choose_move(&state).is_err());
    }
}

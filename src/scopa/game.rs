//! Game management.
//!
//! A game consists of a sequence of [`Round`]s, in which players score points
//! for their scopas and the four round bonuses. The game ends once some player
//! reaches the winning score, with every player tied at the top score sharing
//! the win.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use super::{
    score_round, validate_roster, ConfigError, Event, GameConfig, Move, PlayerState, Round,
    RoundError, RoundRecord, Scoreboard, Seat,
};

/// The record of a whole game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord<'a> {
    pub config: &'a GameConfig,
    pub rounds: &'a [RoundRecord],
    pub scores: &'a Scoreboard,
    pub winners: &'a [String],
}

/// A game of scopa.
#[derive(Debug)]
pub struct Game<R = ChaCha8Rng> {
    config: GameConfig,
    rng: R,
    /// The current round.
    round: Round,
    /// The current round number, starting from 1.
    number: u32,
    /// The current scores.
    scores: Scoreboard,
    winners: Option<Vec<String>>,
    history: Vec<RoundRecord>,
    events: VecDeque<Event>,
}

impl<R: Rng> Game<R> {
    /// Creates a new [`Game`] for the named players, in turn order, and starts
    /// the first round.
    pub fn new<S: AsRef<str>>(config: GameConfig, names: &[S], rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_roster(names)?;
        let seats = names.iter().map(|n| Seat::new(n.as_ref())).collect();
        let mut game = Self {
            round: Round::new(&config, seats)?,
            config,
            rng,
            number: 0,
            scores: Scoreboard::new(names.iter().map(|n| n.as_ref())),
            winners: None,
            history: vec![],
            events: VecDeque::new(),
        };
        game.start_round();
        Ok(game)
    }

    /// Returns an immutable reference to the current round.
    #[cfg(test)]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The current round number, starting from 1.
    pub fn round_number(&self) -> u32 {
        self.number
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Returns the winning players, if the game is over.
    pub fn winners(&self) -> Option<&[String]> {
        self.winners.as_deref()
    }

    pub fn is_over(&self) -> bool {
        self.winners.is_some()
    }

    /// Records of every completed round.
    #[cfg(test)]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn record(&self) -> GameRecord<'_> {
        GameRecord {
            config: &self.config,
            rounds: &self.history,
            scores: &self.scores,
            winners: self.winners().unwrap_or_default(),
        }
    }

    /// Returns the name of the player expected to move next, or None if the
    /// game is over.
    pub fn next_turn(&self) -> Option<&str> {
        if self.is_over() {
            None
        } else {
            self.round.next_turn()
        }
    }

    pub fn player_state(&self, name: &str) -> Option<PlayerState<'_>> {
        self.round.player_state(name)
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Applies the move for the named player. When the move finishes the
    /// round, the round is scored and either the next round begins or the
    /// game ends.
    pub fn apply_move(&mut self, name: &str, mv: Move) -> Result<(), RoundError> {
        if self.is_over() {
            return Err(RoundError::GameOver);
        }
        let result = self.round.apply_move(name, mv);
        self.events.extend(self.round.drain_events());
        result?;
        if self.round.is_over() {
            self.end_round();
        }
        Ok(())
    }

    fn start_round(&mut self) {
        self.number += 1;
        debug!(round = self.number, scores = %self.scores, "new round");
        self.events.push_back(Event::NewRound {
            round: self.number,
            scores: self.scores.clone(),
        });
        self.round.start(&mut self.rng);
        self.events.extend(self.round.drain_events());
    }

    fn end_round(&mut self) {
        let awards = score_round(self.round.seats());
        self.scores.apply(&awards);
        let unclaimed = self.round.close(&awards);
        debug!(
            round = self.number,
            unclaimed = unclaimed.len(),
            scores = %self.scores,
            "round scored"
        );
        self.events.push_back(Event::RoundScored {
            awards,
            unclaimed,
            scores: self.scores.clone(),
        });
        self.history.push(self.round.take_record());

        match self.scores.winners(self.config.winning_score) {
            Some(winners) => {
                debug!(winners = ?winners, scores = %self.scores, "game over");
                self.events.push_back(Event::GameOver {
                    winners: winners.clone(),
                    scores: self.scores.clone(),
                });
                self.winners = Some(winners);
            }
            None => self.start_round(),
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;
    use rand::SeedableRng;

    use super::*;
    use crate::scopa::config::DECK_SIZE;
    use crate::scopa::score::Bonus;
    use crate::scopa::Strategy;

    fn game(config: GameConfig, seed: u64) -> Game {
        Game::new(config, &["Kenny", "Brenna", "Andreas"], ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    /// Plays the game to completion with the default strategy for everyone,
    /// returning every event.
    fn autoplay(game: &mut Game) -> Vec<Event> {
        let strategy = Strategy::default();
        let mut events = vec![];
        loop {
            while let Some(event) = game.pop_event() {
                events.push(event);
            }
            let Some(name) = game.next_turn().map(str::to_string) else {
                break;
            };
            let state = game.player_state(&name).unwrap();
            let mv = strategy.select_move(state.table, state.hand).unwrap();
            game.apply_move(&name, mv).unwrap();
        }
        events
    }

    #[test]
    fn test_config_errors() {
        let rng = || ChaCha8Rng::seed_from_u64(0);
        assert_matches!(
            Game::new(GameConfig::default(), &["Kenny"], rng()),
            Err(ConfigError::TooFewPlayers(1))
        );
        assert_matches!(
            Game::new(GameConfig::default(), &["Kenny", "Kenny"], rng()),
            Err(ConfigError::DuplicatePlayer(_))
        );
        assert_matches!(
            Game::new(GameConfig::default().with_hand_size(0), &["A", "B"], rng()),
            Err(ConfigError::InvalidHandSize)
        );
    }

    #[test]
    fn test_first_round_is_dealt() {
        let mut game = game(GameConfig::default(), 1);
        assert_eq!(game.round_number(), 1);
        assert_eq!(game.next_turn(), Some("Kenny"));
        assert_eq!(game.round().table().len(), 4);
        assert_matches!(game.pop_event(), Some(Event::NewRound { round: 1, .. }));
        assert_matches!(game.pop_event(), Some(Event::Dealing { dealer }) if dealer == "Kenny");
        assert_matches!(game.pop_event(), Some(Event::TurnBegin { player, hand, .. })
            if player == "Kenny" && hand.len() == 3);
        assert_matches!(
            game.apply_move("Brenna", "D,ACO".parse().unwrap()),
            Err(RoundError::OutOfTurn(p)) if p == "Kenny"
        );
    }

    #[test]
    fn test_robot_game_runs_to_completion() {
        for seed in [3, 5, 8] {
            let mut game = game(GameConfig::default(), seed);
            let events = autoplay(&mut game);

            let winners = game.winners().unwrap().to_vec();
            assert!(!winners.is_empty());
            let best = game.scores().iter().map(|(_, s)| s).max().unwrap();
            assert!(best >= 11);
            for name in &winners {
                assert_eq!(game.scores().get(name), best);
            }
            assert_matches!(events.last(), Some(Event::GameOver { winners: w, .. }) if *w == winners);
            assert_matches!(
                game.apply_move("Kenny", "D,ACO".parse().unwrap()),
                Err(RoundError::GameOver)
            );

            let rounds = events
                .iter()
                .filter(|e| matches!(e, Event::RoundScored { .. }))
                .count();
            assert_eq!(rounds, game.history().len());
            assert_eq!(game.round_number() as usize, rounds);
        }
    }

    #[test]
    fn test_every_card_is_captured_or_unclaimed() {
        let mut game = game(GameConfig::default().with_winning_score(1), 13);
        autoplay(&mut game);
        let record = &game.history()[0];
        let captured: usize = game.round().seats().iter().map(|s| s.captured().len()).sum();
        assert_eq!(captured + record.unclaimed.len(), DECK_SIZE);
        assert_eq!(record.plays.len(), 36);
    }

    #[test]
    fn test_scopas_are_scored() {
        let mut game = game(GameConfig::default().with_winning_score(1), 21);
        let events = autoplay(&mut game);
        let scopas = events
            .iter()
            .filter(|e| matches!(e, Event::Scopa { .. }))
            .count();
        let awards = &game.history()[0].awards;
        let scored: u32 = awards
            .iter()
            .filter(|a| a.bonus == Bonus::Scopa)
            .map(|a| a.points)
            .sum();
        assert_eq!(scored as usize, scopas);
        let total: u32 = game.scores().iter().map(|(_, s)| s).sum();
        assert_eq!(total, awards.iter().map(|a| a.points).sum::<u32>());
        // The seven of coins may be left on the table.
        let fixed = awards.iter().filter(|a| a.bonus != Bonus::Scopa).count();
        assert!(fixed == 3 || fixed == 4);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = game(GameConfig::default(), 99);
        let mut b = game(GameConfig::default(), 99);
        autoplay(&mut a);
        autoplay(&mut b);
        assert_eq!(a.history(), b.history());
        assert_eq!(a.scores(), b.scores());
    }

    #[test]
    fn test_record_serializes_to_json() {
        let mut game = game(GameConfig::default().with_winning_score(1), 4);
        autoplay(&mut game);

        let value = serde_json::to_value(game.history()).unwrap();
        let rounds: Vec<RoundRecord> = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(rounds, game.history());

        let plays = value[0]["plays"].as_array().unwrap();
        assert_eq!(plays.len(), 36);
        let first = &game.history()[0].plays[0];
        assert_eq!(plays[0]["player"], first.player.as_str());
        assert_eq!(plays[0]["move"], first.mv.code().as_str());
        assert!(value[0]["table"][0].as_str().unwrap().len() >= 3);

        let record = serde_json::to_value(game.record()).unwrap();
        assert_eq!(record["config"]["winning_score"], 1);
        assert_eq!(record["rounds"], value);
        let winners: Vec<String> = serde_json::from_value(record["winners"].clone()).unwrap();
        assert_eq!(Some(&winners[..]), game.winners());
    }
}

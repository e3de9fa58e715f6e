//! Game configuration.

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ConfigError, StrategyKind};

/// The number of cards in a full deck.
pub const DECK_SIZE: usize = 40;

/// Rules for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The game ends once a player reaches this score.
    pub winning_score: u32,
    /// Cards dealt to each player per hand.
    pub hand_size: usize,
    /// Cards dealt face-up to the table at the start of each round.
    pub board_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            winning_score: 11,
            hand_size: 3,
            board_size: 4,
        }
    }
}

impl GameConfig {
    /// Sets the target score.
    pub fn with_winning_score(mut self, score: u32) -> Self {
        self.winning_score = score;
        self
    }

    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::InvalidHandSize);
        }
        if self.board_size >= DECK_SIZE {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        Ok(())
    }
}

/// Checks that there are enough players, and that names are unique.
pub fn validate_roster<S: AsRef<str>>(names: &[S]) -> Result<(), ConfigError> {
    if names.len() < 2 {
        return Err(ConfigError::TooFewPlayers(names.len()));
    }
    let mut seen = HashSet::with_capacity(names.len());
    for name in names.iter().map(AsRef::as_ref) {
        if name.is_empty() {
            return Err(ConfigError::EmptyPlayerName);
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicatePlayer(name.to_string()));
        }
    }
    Ok(())
}

/// How a player's moves are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Moves are typed at the console.
    Human,
    /// Moves are chosen by a strategy.
    Robot(StrategyKind),
}

/// A player in the roster, written `NAME[:MODE[:STRATEGY]]`.
///
/// MODE is `human` or `robot`, and defaults to `robot`. STRATEGY names the
/// robot's strategy, and defaults to `default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub controller: Controller,
}

impl PlayerSpec {
    pub fn human<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn robot<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Robot(StrategyKind::default()),
        }
    }
}

impl FromStr for PlayerSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigError::EmptyPlayerName);
        }
        let controller = match (parts.next(), parts.next()) {
            (None, _) => Controller::Robot(StrategyKind::default()),
            (Some(mode), strategy) if mode.eq_ignore_ascii_case("robot") => {
                let strategy = strategy.map(StrategyKind::from_str).transpose()?;
                Controller::Robot(strategy.unwrap_or_default())
            }
            (Some(mode), None) if mode.eq_ignore_ascii_case("human") => Controller::Human,
            (Some(mode), _) => return Err(ConfigError::UnknownInputMode(mode.to_string())),
        };
        Ok(Self {
            name: name.to_string(),
            controller,
        })
    }
}

impl Display for PlayerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.controller {
            Controller::Human => write!(f, "{}:human", self.name),
            Controller::Robot(strategy) => write!(f, "{}:robot:{strategy}", self.name),
        }
    }
}

impl Serialize for PlayerSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PlayerSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PlayerSpec::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Settings loaded from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub game: GameConfig,
    pub players: Vec<PlayerSpec>,
}

impl Settings {
    /// The roster used when none is configured.
    pub fn default_players() -> Vec<PlayerSpec> {
        vec![
            PlayerSpec::human("You"),
            PlayerSpec::robot("Brenna"),
            PlayerSpec::robot("Andreas"),
        ]
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_parse_player_spec() {
        let spec: PlayerSpec = "Kenny:human".parse().unwrap();
        assert_eq!(spec, PlayerSpec::human("Kenny"));
        let spec: PlayerSpec = "Brenna".parse().unwrap();
        assert_eq!(spec, PlayerSpec::robot("Brenna"));
        let spec: PlayerSpec = "Andreas:Robot:default".parse().unwrap();
        assert_eq!(spec, PlayerSpec::robot("Andreas"));

        assert_matches!(
            "Kenny:gui".parse::<PlayerSpec>(),
            Err(ConfigError::UnknownInputMode(m)) if m == "gui"
        );
        assert_matches!(
            "Kenny:human:default".parse::<PlayerSpec>(),
            Err(ConfigError::UnknownInputMode(_))
        );
        assert_matches!(
            "Brenna:robot:greedy".parse::<PlayerSpec>(),
            Err(ConfigError::UnknownStrategy(s)) if s == "greedy"
        );
        assert_matches!(":human".parse::<PlayerSpec>(), Err(ConfigError::EmptyPlayerName));
    }

    #[test]
    fn test_validate_roster() {
        assert_eq!(validate_roster(&["A"]), Err(ConfigError::TooFewPlayers(1)));
        assert_eq!(
            validate_roster(&["A", "B", "A"]),
            Err(ConfigError::DuplicatePlayer("A".to_string()))
        );
        assert_eq!(validate_roster(&["A", "B"]), Ok(()));
    }

    #[test]
    fn test_validate_config() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(
            GameConfig::default().with_hand_size(0).validate(),
            Err(ConfigError::InvalidHandSize)
        );
        assert_eq!(
            GameConfig::default().with_board_size(40).validate(),
            Err(ConfigError::InvalidBoardSize(40))
        );
    }

    #[test]
    fn test_settings_from_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"winning_score": 21, "players": ["Kenny:human", "Brenna"]}"#,
        )
        .unwrap();
        assert_eq!(settings.game, GameConfig::default().with_winning_score(21));
        assert_eq!(
            settings.players,
            vec![PlayerSpec::human("Kenny"), PlayerSpec::robot("Brenna")]
        );

        let err = serde_json::from_str::<Settings>(r#"{"players": ["Kenny:gui"]}"#);
        assert!(err.is_err());
    }
}

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod deck;
mod scopa;
use self::args::{Args, Ui};
use self::scopa::{
    play, Console, Controller, Game, Players, Presenter, Robot, Settings, Strategy, Text, Tracing,
};

/// The log level used when `RUST_LOG` is unset. A quiet game is reported
/// entirely through `info` events.
fn default_filter(verbose: bool, ui: Ui) -> &'static str {
    match (verbose, ui) {
        (true, _) => "debug",
        (false, Ui::Quiet) => "info",
        (false, Ui::Text) => "warn",
    }
}

fn init_logging(verbose: bool, ui: Ui) {
    let default = default_filter(verbose, ui);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads settings from the file, if any, and applies command line overrides.
fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parse {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(score) = args.winning_score {
        settings.game = settings.game.with_winning_score(score);
    }
    if let Some(size) = args.hand_size {
        settings.game = settings.game.with_hand_size(size);
    }
    if let Some(size) = args.board_size {
        settings.game = settings.game.with_board_size(size);
    }
    if !args.players.is_empty() {
        settings.players = args.players.clone();
    }
    if settings.players.is_empty() {
        settings.players = Settings::default_players();
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ui = args.ui.unwrap_or_default();
    init_logging(args.verbose, ui);

    let settings = load_settings(&args)?;
    let mut players = Players::default();
    let mut humans = HashSet::new();
    for spec in &settings.players {
        let player = match spec.controller {
            Controller::Human => {
                humans.insert(spec.name.clone());
                Console.into_player()
            }
            Controller::Robot(kind) => Robot::new(Strategy::from(kind)).into_player(),
        };
        players.insert(spec.name.clone(), player);
    }

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let names: Vec<_> = settings.players.iter().map(|p| p.name.as_str()).collect();
    let mut game = Game::new(settings.game.clone(), &names, rng)?;
    info!(players = names.len(), seed = ?args.seed, "starting game");

    let presenter: Box<dyn Presenter> = match ui {
        Ui::Text => Box::new(Text::new(!args.no_color, humans)),
        Ui::Quiet => Box::new(Tracing),
    };
    let result = play(&mut game, &players, presenter.as_ref());
    info!(
        rounds = game.round_number(),
        scores = %game.scores(),
        "finished"
    );

    if let Some(path) = &args.record {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &game.record())
            .with_context(|| format!("write {}", path.display()))?;
    }
    result.map(|_| ())
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::scopa::{GameConfig, PlayerSpec};

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("scopa").chain(argv.iter().copied())).unwrap()
    }

    fn settings_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_settings() {
        let settings = load_settings(&args(&[])).unwrap();
        assert_eq!(settings.game, GameConfig::default());
        assert_eq!(settings.players, Settings::default_players());
        assert_eq!(settings.players[0], PlayerSpec::human("You"));
        assert_eq!(settings.players.len(), 3);
    }

    #[test]
    fn test_flags_without_file() {
        let settings = load_settings(&args(&["--winning-score", "21", "-p", "A", "-p", "B"])).unwrap();
        assert_eq!(settings.game, GameConfig::default().with_winning_score(21));
        assert_eq!(
            settings.players,
            vec![PlayerSpec::robot("A"), PlayerSpec::robot("B")]
        );
    }

    #[test]
    fn test_flags_override_file() {
        let file = settings_file(
            r#"{"winning_score": 16, "hand_size": 2, "players": ["Kenny:human", "Brenna"]}"#,
        );
        let path = file.path().to_str().unwrap();

        let settings = load_settings(&args(&["--config", path])).unwrap();
        assert_eq!(
            settings.game,
            GameConfig::default().with_winning_score(16).with_hand_size(2)
        );
        assert_eq!(
            settings.players,
            vec![PlayerSpec::human("Kenny"), PlayerSpec::robot("Brenna")]
        );

        let settings =
            load_settings(&args(&["--config", path, "--winning-score", "5", "-p", "Andreas", "-p", "Lucia"]))
                .unwrap();
        assert_eq!(
            settings.game,
            GameConfig::default().with_winning_score(5).with_hand_size(2)
        );
        assert_eq!(
            settings.players,
            vec![PlayerSpec::robot("Andreas"), PlayerSpec::robot("Lucia")]
        );
    }

    #[test]
    fn test_file_without_players_uses_default_roster() {
        let file = settings_file(r#"{"board_size": 6}"#);
        let path = file.path().to_str().unwrap();
        let settings = load_settings(&args(&["--config", path])).unwrap();
        assert_eq!(settings.game, GameConfig::default().with_board_size(6));
        assert_eq!(settings.players, Settings::default_players());
    }

    #[test]
    fn test_bad_settings_file() {
        let file = settings_file(r#"{"players": ["Kenny:gui"]}"#);
        let path = file.path().to_str().unwrap();
        assert!(load_settings(&args(&["--config", path])).is_err());
        assert!(load_settings(&args(&["--config", "/nonexistent/scopa.json"])).is_err());
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, Ui::Text), "warn");
        assert_eq!(default_filter(false, Ui::Quiet), "info");
        assert_eq!(default_filter(true, Ui::Quiet), "debug");
        assert_eq!(default_filter(true, Ui::Text), "debug");
    }
}

//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::scopa::PlayerSpec;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// A player, as NAME[:MODE[:STRATEGY]], in turn order. May be repeated.
    ///
    /// MODE is human or robot (the default), and STRATEGY names the robot's
    /// strategy. Without any players, one human plays two robots.
    #[arg(short, long = "player", value_name = "SPEC")]
    pub players: Vec<PlayerSpec>,

    /// A JSON settings file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible shuffle.
    #[arg(long)]
    pub seed: Option<u64>,

    /// The score needed to win.
    #[arg(long)]
    pub winning_score: Option<u32>,

    /// Cards dealt to each player per hand.
    #[arg(long)]
    pub hand_size: Option<usize>,

    /// Cards dealt to the table at the start of each round.
    #[arg(long)]
    pub board_size: Option<usize>,

    #[arg(short, long)]
    pub ui: Option<Ui>,

    /// Disable ANSI colours.
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the game record as JSON.
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Ui {
    /// Print the game to the console.
    #[default]
    Text,
    /// Only log events.
    Quiet,
}

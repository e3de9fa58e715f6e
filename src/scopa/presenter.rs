//! Rendering game events.

use std::collections::HashSet;

use ansi_term::{ANSIString, ANSIStrings, Style};
use itertools::Itertools;
use tracing::info;

use super::{Card, Event, Scoreboard};

/// A sink for game events.
pub trait Presenter {
    fn present(&self, event: &Event);
}

/// Plain console output, with optional ANSI colours.
///
/// Hands are only shown for the human players, since everyone shares the
/// console.
pub struct Text {
    color: bool,
    humans: HashSet<String>,
}

impl Text {
    pub fn new<I, S>(color: bool, humans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color,
            humans: humans.into_iter().map(Into::into).collect(),
        }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_cards(&self, cards: &[Card]) -> String {
        if cards.is_empty() {
            return "(none)".to_string();
        }
        let mut parts: Vec<ANSIString> = vec![];
        for (ii, card) in cards.iter().enumerate() {
            if ii > 0 {
                parts.push(" ".into());
            }
            parts.push(card.to_ansi_string());
        }
        self.format(&ANSIStrings(&parts))
    }

    fn format_bold(&self, s: String) -> String {
        self.format(&ANSIStrings(&[Style::new().bold().paint(s)]))
    }

    fn format_scores(scores: &Scoreboard) -> String {
        scores.iter().map(|(n, s)| format!("{n} {s}")).join(", ")
    }

    /// Renders the event as lines of text.
    fn render(&self, event: &Event) -> Vec<String> {
        match event {
            Event::NewRound { round, scores } => vec![
                self.format_bold(format!("Round {round}")),
                format!("Scores: {}", Self::format_scores(scores)),
            ],
            Event::Dealing { dealer } => vec![format!("{dealer} deals")],
            Event::TurnBegin {
                player,
                table,
                hand,
            } => {
                let mut lines = vec![format!("Table: {}", self.format_cards(table))];
                if self.humans.contains(player) {
                    lines.push(format!("Hand: {}", self.format_cards(hand)));
                }
                lines
            }
            Event::InvalidMove { player, error } => vec![format!("{player}: invalid move, {error}")],
            Event::MoveMade { player, mv } => {
                let cards = mv.board_cards();
                let line = if cards.is_empty() {
                    format!("{player} discards {}", self.format_cards(&[mv.hand_card()]))
                } else {
                    format!(
                        "{player} takes {} with {}",
                        self.format_cards(cards),
                        self.format_cards(&[mv.hand_card()])
                    )
                };
                vec![line]
            }
            Event::Scopa { player } => vec![self.format_bold(format!("Scopa for {player}!"))],
            Event::PostMove { .. } => vec![],
            Event::RoundScored {
                awards,
                unclaimed,
                scores,
            } => {
                let mut lines: Vec<_> = awards
                    .iter()
                    .map(|a| format!("{}: {} for {}", a.player, a.points, a.bonus))
                    .collect();
                if !unclaimed.is_empty() {
                    lines.push(format!("Unclaimed: {}", self.format_cards(unclaimed)));
                }
                lines.push(format!("Scores: {}", Self::format_scores(scores)));
                lines
            }
            Event::GameOver { winners, scores } => {
                let line = match &winners[..] {
                    [winner] => format!("{winner} wins!"),
                    tied => format!("Tie between {}!", tied.join(" and ")),
                };
                vec![
                    self.format_bold(line),
                    format!("Final scores: {}", Self::format_scores(scores)),
                ]
            }
        }
    }
}

impl Presenter for Text {
    fn present(&self, event: &Event) {
        for line in self.render(event) {
            println!("{line}");
        }
    }
}

/// Reports every event as a log line.
#[derive(Debug, Default)]
pub struct Tracing;

impl Presenter for Tracing {
    fn present(&self, event: &Event) {
        match event {
            Event::NewRound { round, scores } => info!(round, %scores, "new round"),
            Event::Dealing { dealer } => info!(dealer = %dealer, "dealing"),
            Event::TurnBegin {
                player,
                table,
                hand,
            } => info!(
                player = %player,
                table = %table.iter().join(" "),
                hand = %hand.iter().join(" "),
                "turn"
            ),
            Event::InvalidMove { player, error } => info!(player = %player, %error, "invalid move"),
            Event::MoveMade { player, mv } => info!(player = %player, %mv, "move"),
            Event::Scopa { player } => info!(player = %player, "scopa"),
            Event::PostMove { player, hand } => {
                info!(player = %player, hand = %hand.iter().join(" "), "hand")
            }
            Event::RoundScored {
                awards,
                unclaimed,
                scores,
            } => {
                for award in awards {
                    info!(player = %award.player, bonus = %award.bonus, points = award.points, "award");
                }
                info!(unclaimed = %unclaimed.iter().join(" "), %scores, "round scored");
            }
            Event::GameOver { winners, scores } => {
                info!(winners = %winners.join(", "), %scores, "game over")
            }
        }
    }
}

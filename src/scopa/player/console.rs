//! Simple console interactive player.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context};

use super::{Move, Player, PlayerError, PlayerState};

/// A human player, typing moves at the console.
#[derive(Debug, Default)]
pub struct Console;

/// Reads lines until one parses, reporting parse errors along the way.
fn prompt<T, R, W>(prompt: &str, input: &mut R, output: &mut W) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    loop {
        let mut buffer = String::new();
        write!(output, "{prompt}")?;
        output.flush().context("flush")?;
        if input.read_line(&mut buffer).context("read")? == 0 {
            bail!("input closed");
        }
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            match T::from_str(trimmed) {
                Ok(obj) => return Ok(obj),
                Err(err) => writeln!(output, "Invalid move: {err}")?,
            }
        }
    }
}

impl Console {
    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }
}

impl Player for Console {
    fn choose_move(&self, state: &PlayerState) -> anyhow::Result<Move> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let text = format!("{} ({} left in the deck), your move? ", state.name, state.deck);
        prompt(&text, &mut stdin.lock(), &mut stdout)
    }

    fn handle_error(&self, _: &PlayerError) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut input = Cursor::new("\nX,AC\nT,7CO\nt, 7co, 3cu, 4cl\n");
        let mut output = vec![];
        let mv: Move = prompt("? ", &mut input, &mut output).unwrap();
        assert_eq!(mv.code(), "T,7CO,3CU,4CL");

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("? ").count(), 4);
        assert!(output.contains("Invalid move: unsupported move type \"X\""));
        assert!(output.contains("Invalid move: a take needs at least one board card"));
    }

    #[test]
    fn test_prompt_eof() {
        let mut input = Cursor::new("D,7CO,3CU\n");
        let mut output = vec![];
        assert!(prompt::<Move, _, _>("? ", &mut input, &mut output).is_err());
    }
}

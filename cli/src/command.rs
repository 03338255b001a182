use std::str::FromStr;

use anyhow::{Context, bail};
use minesweep_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    /// Reveal or flag depending on flag mode
    Click(Coord2),
    FlagMode,
    Restart,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command");
        };

        let command = match verb {
            "r" | "reveal" => Self::Reveal(coords(&mut words)?),
            "f" | "flag" => Self::Flag(coords(&mut words)?),
            "c" | "click" => Self::Click(coords(&mut words)?),
            "m" | "mode" => Self::FlagMode,
            "n" | "new" => Self::Restart,
            "q" | "quit" => Self::Quit,
            other => bail!("Unknown command {other:?}, try r/f/c ROW COL, m, n or q"),
        };

        if words.next().is_some() {
            bail!("Too many arguments for {verb:?}");
        }
        Ok(command)
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        words
            .next()
            .with_context(|| format!("Missing {axis}"))?
            .parse()
            .with_context(|| format!("Invalid {axis}"))
    };
    let row = next("row")?;
    let col = next("col")?;
    Ok((row, col))
}

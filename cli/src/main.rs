use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use minesweep_core::{FlagOutcome, Interaction, Preset, Session};

use command::Command;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty: easy, normal or hard
    #[arg(short, long, default_value_t = Preset::Easy)]
    preset: Preset,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the end-of-game summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(args.preset, seed);
    run(io::stdin().lock(), &mut io::stdout().lock(), &mut session, args.json)
}

/// Plays commands from `input` until it runs dry or the player quits.
fn run(
    input: impl BufRead,
    out: &mut impl Write,
    session: &mut Session,
    json: bool,
) -> anyhow::Result<()> {
    render::board(out, session)?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        let ended = match command {
            Command::Reveal(coords) => session.reveal(coords).ended(),
            Command::Flag(coords) => {
                let mv = session.toggle_flag(coords);
                if mv.outcome == FlagOutcome::Rejected {
                    writeln!(out, "No flags left")?;
                }
                mv.ended()
            }
            Command::Click(coords) => match session.interact(coords) {
                Interaction::Reveal(mv) => mv.ended(),
                Interaction::Flag(mv) => {
                    if mv.outcome == FlagOutcome::Rejected {
                        writeln!(out, "No flags left")?;
                    }
                    mv.ended()
                }
                Interaction::Ignored => None,
            },
            Command::FlagMode => {
                session.toggle_flag_mode();
                None
            }
            Command::Restart => {
                session.restart();
                None
            }
            Command::Quit => break,
        };

        render::board(out, session)?;
        if ended.is_some() {
            report(out, session, json)?;
        }
    }

    Ok(())
}

fn report(out: &mut impl Write, session: &Session, json: bool) -> anyhow::Result<()> {
    let Some(summary) = session.summary() else {
        return Ok(());
    };

    if json {
        serde_json::to_writer(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{} Time {}, {} of {} mines flagged. Type n for a new game.",
            if summary.won { "Cleared!" } else { "Boom." },
            render::clock(summary.elapsed),
            summary.correctly_flagged,
            summary.mine_count
        )?;
    }
    Ok(())
}

use std::io::{self, Write};
use std::time::Duration;

use minesweep_core::{DisclosedCell, Session, VisibleCell};

fn visible_glyph(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Hidden => '#',
        VisibleCell::Flagged => 'F',
        VisibleCell::Revealed(0) => '.',
        VisibleCell::Revealed(count) => char::from(b'0' + count),
        VisibleCell::Mine => '*',
    }
}

fn disclosed_glyph(cell: DisclosedCell) -> char {
    match cell {
        DisclosedCell::Hidden => '#',
        DisclosedCell::Revealed(0) => '.',
        DisclosedCell::Revealed(count) => char::from(b'0' + count),
        DisclosedCell::Exploded => 'X',
        DisclosedCell::Mine => '*',
        DisclosedCell::Flag => 'F',
        DisclosedCell::WrongFlag => 'x',
    }
}

/// `mm:ss`, as shown next to the board
pub(crate) fn clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub(crate) fn board(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let board = session.board();
    let rows: Vec<Vec<char>> = match board.disclose() {
        Some(disclosure) => disclosure
            .rows()
            .map(|row| row.map(disclosed_glyph).collect())
            .collect(),
        None => board
            .visible_grid()
            .rows()
            .into_iter()
            .map(|row| row.iter().copied().map(visible_glyph).collect())
            .collect(),
    };

    write!(out, "    ")?;
    for col in 0..board.size() {
        write!(out, "{:>3}", col)?;
    }
    writeln!(out)?;
    for (row, glyphs) in rows.iter().enumerate() {
        write!(out, "{:>3} ", row)?;
        for glyph in glyphs {
            write!(out, "{:>3}", glyph)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "flags {}/{}  time {}{}",
        board.flagged_count(),
        board.mine_count(),
        clock(session.elapsed()),
        if session.flag_mode() { "  [flag mode]" } else { "" }
    )
}

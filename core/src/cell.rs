use serde::{Deserialize, Serialize};

/// Full state of one grid position, including the parts hidden from the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Only meaningful for non-mine cells.
    pub adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed
    }

    /// Blank cells are the ones that propagate a reveal to their neighbours.
    pub const fn is_blank(self) -> bool {
        !self.is_mine && self.adjacent_mine_count == 0
    }

    /// What the player is allowed to see of this cell during play.
    pub const fn visible(self) -> VisibleCell {
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (true, _, true) => VisibleCell::Mine,
            (true, _, false) => VisibleCell::Revealed(self.adjacent_mine_count),
            (false, true, _) => VisibleCell::Flagged,
            (false, false, _) => VisibleCell::Hidden,
        }
    }
}

/// Player-visible state of a cell, used by views to render the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// A revealed mine, only ever seen on the cell that lost the game.
    Mine,
}

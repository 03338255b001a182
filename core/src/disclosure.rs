use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a cell is presented once the whole mine layout is disclosed after a loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisclosedCell {
    Hidden,
    Revealed(u8),
    /// The mine that lost the game.
    Exploded,
    /// A mine the player never found.
    Mine,
    /// A mine the player flagged correctly.
    Flag,
    /// A flag placed on a safe cell.
    WrongFlag,
}

impl DisclosedCell {
    fn from_cell(cell: Cell) -> Self {
        match (cell.is_mine, cell.is_revealed, cell.is_flagged) {
            (true, true, _) => Self::Exploded,
            (true, false, true) => Self::Flag,
            (true, false, false) => Self::Mine,
            (false, _, true) => Self::WrongFlag,
            (false, true, false) => Self::Revealed(cell.adjacent_mine_count),
            (false, false, false) => Self::Hidden,
        }
    }
}

/// Read-only overlay of the full mine layout; building it never touches the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disclosure {
    cells: Array2<DisclosedCell>,
}

impl Disclosure {
    pub(crate) fn from_board(board: &Board) -> Self {
        Self {
            cells: board.cells().map(|&cell| DisclosedCell::from_cell(cell)),
        }
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<DisclosedCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = DisclosedCell> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub fn count(&self, kind: DisclosedCell) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn disclosure_marks_every_kind_of_cell() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (0, 2), (2, 2)]).unwrap();
        let mut board = Board::new(layout);

        board.toggle_flag((0, 2));
        board.toggle_flag((2, 0));
        board.reveal((1, 1));
        board.reveal((0, 0));

        let disclosure = board.disclose().unwrap();

        assert_eq!(disclosure.cell_at((0, 0)), Some(DisclosedCell::Exploded));
        assert_eq!(disclosure.cell_at((0, 2)), Some(DisclosedCell::Flag));
        assert_eq!(disclosure.cell_at((2, 2)), Some(DisclosedCell::Mine));
        assert_eq!(disclosure.cell_at((2, 0)), Some(DisclosedCell::WrongFlag));
        assert_eq!(disclosure.cell_at((1, 1)), Some(DisclosedCell::Revealed(3)));
        assert_eq!(disclosure.cell_at((1, 0)), Some(DisclosedCell::Hidden));
        assert_eq!(disclosure.count(DisclosedCell::Hidden), 4);
    }

    #[test]
    fn disclosure_leaves_board_untouched() {
        let layout = MineLayout::from_mine_coords(2, &[(1, 1)]).unwrap();
        let mut board = Board::new(layout);
        board.reveal((1, 1));
        let snapshot = board.clone();

        let disclosure = board.disclose().unwrap();

        assert_eq!(board, snapshot);
        assert_eq!(disclosure.size(), 2);
        let rows: Vec<Vec<_>> = disclosure.rows().map(|row| row.collect()).collect();
        assert_eq!(
            rows,
            vec![
                vec![DisclosedCell::Hidden, DisclosedCell::Hidden],
                vec![DisclosedCell::Hidden, DisclosedCell::Exploded],
            ]
        );
    }

    #[test]
    fn nothing_to_disclose_while_playing() {
        let layout = MineLayout::from_mine_coords(2, &[(1, 1)]).unwrap();
        let mut board = Board::new(layout);
        assert!(board.disclose().is_none());

        board.reveal((0, 0));
        assert!(board.disclose().is_none());
    }
}

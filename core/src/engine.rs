use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Initial state
    #[default]
    NotStarted,
    /// The player has interacted with the board
    InProgress,
    /// Every safe cell has been revealed
    Won,
    /// A mine has been revealed
    Lost,
}

impl GameStatus {
    /// Indicates the game has not started yet
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game of Minesweeper from the first move to the last.
///
/// Serializable as a snapshot for views; a board can only be built from a validated layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    size: Coord,
    mine_count: CellCount,
    cells: Array2<Cell>,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
    correctly_flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let cells = Array2::from_shape_fn((usize::from(size), usize::from(size)), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = mine_layout.contains_mine(coords);
            Cell {
                is_mine,
                adjacent_mine_count: if is_mine {
                    0
                } else {
                    mine_layout.adjacent_mine_count(coords)
                },
                ..Default::default()
            }
        });

        Self {
            size,
            mine_count: mine_layout.mine_count(),
            cells,
            revealed_safe_count: 0,
            flagged_count: 0,
            correctly_flagged_count: 0,
            status: GameStatus::NotStarted,
            triggered_mine: None,
        }
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    /// Validates the dimensions and builds a randomly mined board.
    pub fn initialize(size: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(size, mines)?;
        Ok(Self::generate(config, RandomMinefieldGenerator::new(seed)))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_final()
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        mult(self.size, self.size) - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn correctly_flagged_count(&self) -> CellCount {
        self.correctly_flagged_count
    }

    /// How many flags can still be placed
    pub fn flags_left(&self) -> CellCount {
        self.mine_count - self.flagged_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn visible_at(&self, coords: Coord2) -> Option<VisibleCell> {
        self.cell_at(coords).map(Cell::visible)
    }

    /// Snapshot of what the player can see, for views that redraw the whole board.
    pub fn visible_grid(&self) -> Array2<VisibleCell> {
        self.cells.map(|cell| cell.visible())
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Whether a click on this cell can still do anything.
    pub fn is_interactive(&self, coords: Coord2) -> bool {
        !self.is_finished() && self.cell_at(coords).is_some_and(Cell::is_unrevealed)
    }

    /// Full mine layout overlay, only available once the game is lost.
    pub fn disclose(&self) -> Option<Disclosure> {
        matches!(self.status, GameStatus::Lost).then(|| Disclosure::from_board(self))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Move<RevealOutcome> {
        let mut mv = Move::default();
        let Some(cell) = self.playable_cell(coords) else {
            return mv;
        };
        if cell.is_revealed || cell.is_flagged {
            return mv;
        }

        self.mark_started(&mut mv.events);

        if cell.is_mine {
            self.cells[coords.to_nd_index()].is_revealed = true;
            self.triggered_mine = Some(coords);
            mv.changed.push(coords);
            self.end_game(false, &mut mv.events);
            mv.outcome = RevealOutcome::HitMine;
            return mv;
        }

        self.flood_reveal(coords, &mut mv.changed);
        log::debug!("Revealed {} cells from {:?}", mv.changed.len(), coords);

        mv.outcome = if self.check_win(&mut mv.events) {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };
        mv
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Move<FlagOutcome> {
        let mut mv = Move::default();
        let Some(cell) = self.playable_cell(coords) else {
            return mv;
        };
        if cell.is_revealed {
            return mv;
        }

        self.mark_started(&mut mv.events);

        let index = coords.to_nd_index();
        mv.outcome = if cell.is_flagged {
            self.cells[index].is_flagged = false;
            self.flagged_count -= 1;
            if cell.is_mine {
                self.correctly_flagged_count -= 1;
            }
            FlagOutcome::Unflagged
        } else if self.flags_left() == 0 {
            log::debug!("No flags left for {:?}", coords);
            FlagOutcome::Rejected
        } else {
            self.cells[index].is_flagged = true;
            self.flagged_count += 1;
            if cell.is_mine {
                self.correctly_flagged_count += 1;
            }
            FlagOutcome::Flagged
        };

        if mv.outcome.has_update() {
            mv.changed.push(coords);
        }
        self.check_win(&mut mv.events);
        mv
    }

    /// The cell a move targets, if the game still accepts moves there.
    fn playable_cell(&self, coords: Coord2) -> Option<Cell> {
        if self.is_finished() {
            return None;
        }
        let cell = self.cell_at(coords);
        if cell.is_none() {
            log::debug!("Ignoring move outside the board at {:?}", coords);
        }
        cell
    }

    /// Opens `start` and, through blank cells, every connected cell up to the numbered border.
    fn flood_reveal(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.cells[coords.to_nd_index()];
            // flags are barriers, queued duplicates are skipped here
            if cell.is_revealed || cell.is_flagged || cell.is_mine {
                continue;
            }
            cell.is_revealed = true;
            let blank = cell.is_blank();
            self.revealed_safe_count += 1;
            changed.push(coords);
            log::trace!("Flood opened {:?}", coords);

            if blank {
                let cells = &self.cells;
                to_visit.extend(
                    cells
                        .iter_neighbors(coords)
                        .filter(|&pos| !cells[pos.to_nd_index()].is_revealed),
                );
            }
        }
    }

    fn check_win(&mut self, events: &mut SmallVec<[GameEvent; 2]>) -> bool {
        if self.revealed_safe_count == self.safe_cell_count() {
            self.end_game(true, events);
        }
        matches!(self.status, GameStatus::Won)
    }

    fn mark_started(&mut self, events: &mut SmallVec<[GameEvent; 2]>) {
        if self.status.is_initial() {
            self.status = GameStatus::InProgress;
            events.push(GameEvent::Started);
            log::debug!("Game started");
        }
    }

    fn end_game(&mut self, won: bool, events: &mut SmallVec<[GameEvent; 2]>) {
        if self.is_finished() {
            return;
        }

        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        events.push(GameEvent::Ended { won });
        log::debug!(
            "Game ended, won: {}, correct flags: {}/{}",
            won,
            self.correctly_flagged_count,
            self.mine_count
        );
    }
}

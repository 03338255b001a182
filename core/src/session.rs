use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of a click that is either a reveal or a flag, depending on flag mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    Reveal(Move<RevealOutcome>),
    Flag(Move<FlagOutcome>),
    /// Revealed cell or finished game, nothing was dispatched.
    Ignored,
}

/// End-of-game report shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub preset: Preset,
    pub won: bool,
    pub elapsed: Duration,
    pub correctly_flagged: CellCount,
    pub mine_count: CellCount,
}

/// The game as seen by a front end: the active board, its clock and the flag-mode toggle.
///
/// Dropping the session is how a player returns to the menu.
#[derive(Clone, Debug)]
pub struct Session {
    preset: Preset,
    board: Board,
    clock: GameClock,
    flag_mode: bool,
    rng: SmallRng,
}

impl Session {
    pub fn new(preset: Preset, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Self::fresh_board(preset, &mut rng);
        log::info!("Starting {} game", preset);
        Self {
            preset,
            board,
            clock: GameClock::new(),
            flag_mode: false,
            rng,
        }
    }

    /// Starts a game from a preset name such as `"easy"`.
    pub fn start_game(preset_name: &str, seed: u64) -> Result<Self> {
        Ok(Self::new(preset_name.parse()?, seed))
    }

    /// Throws the current board away and deals a new one with the same preset.
    pub fn restart(&mut self) {
        self.board = Self::fresh_board(self.preset, &mut self.rng);
        self.clock.reset();
        self.flag_mode = false;
        log::info!("Restarting {} game", self.preset);
    }

    fn fresh_board(preset: Preset, rng: &mut SmallRng) -> Board {
        Board::generate(preset.config(), RandomMinefieldGenerator::new(rng.random()))
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn toggle_flag_mode(&mut self) -> bool {
        self.flag_mode = !self.flag_mode;
        self.flag_mode
    }

    pub fn reveal(&mut self, coords: Coord2) -> Move<RevealOutcome> {
        let mv = self.board.reveal(coords);
        self.follow_events(&mv.events);
        mv
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Move<FlagOutcome> {
        let mv = self.board.toggle_flag(coords);
        self.follow_events(&mv.events);
        mv
    }

    /// A primary click: flags in flag mode, reveals otherwise.
    pub fn interact(&mut self, coords: Coord2) -> Interaction {
        if !self.board.is_interactive(coords) {
            return Interaction::Ignored;
        }
        if self.flag_mode {
            Interaction::Flag(self.toggle_flag(coords))
        } else {
            Interaction::Reveal(self.reveal(coords))
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        let won = match self.board.status() {
            GameStatus::Won => true,
            GameStatus::Lost => false,
            GameStatus::NotStarted | GameStatus::InProgress => return None,
        };
        Some(Summary {
            preset: self.preset,
            won,
            elapsed: self.clock.elapsed(),
            correctly_flagged: self.board.correctly_flagged_count(),
            mine_count: self.board.mine_count(),
        })
    }

    fn follow_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Started => self.clock.start(),
                GameEvent::Ended { won } => {
                    self.clock.stop();
                    log::info!(
                        "Game {} after {:?}, {} of {} mines flagged",
                        if *won { "won" } else { "lost" },
                        self.clock.elapsed(),
                        self.board.correctly_flagged_count(),
                        self.board.mine_count()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn mines(session: &Session) -> Vec<Coord2> {
        let size = session.board().size();
        (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .filter(|&coords| session.board().cell_at(coords).unwrap().is_mine)
            .collect()
    }

    #[test]
    fn start_game_by_name() {
        let session = Session::start_game("normal", 1).unwrap();
        assert_eq!(session.preset(), Preset::Normal);
        assert_eq!(session.board().size(), 20);
        assert_eq!(session.board().mine_count(), 40);
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert!(!session.flag_mode());

        assert!(matches!(
            Session::start_game("insane", 1),
            Err(GameError::UnknownPreset(_))
        ));
    }

    #[test]
    fn clock_follows_game_lifecycle() {
        let mut session = Session::new(Preset::Easy, 5);
        assert_eq!(session.elapsed(), Duration::ZERO);

        let mine = mines(&session)[0];
        let safe = (0..10)
            .flat_map(|row| (0..10).map(move |col| (row, col)))
            .find(|coords| !mines(&session).contains(coords))
            .unwrap();

        session.toggle_flag(safe);
        assert!(session.clock.is_running());
        session.toggle_flag(safe);
        session.reveal(mine);

        assert!(!session.clock.is_running());
        let summary = session.summary().unwrap();
        assert!(!summary.won);
        assert_eq!(summary.mine_count, 10);
        assert_eq!(summary.correctly_flagged, 0);
    }

    #[test]
    fn clearing_every_safe_cell_wins_and_freezes_clock() {
        let mut session = Session::new(Preset::Easy, 21);
        let mines = mines(&session);
        let mut last = None;
        for row in 0..10 {
            for col in 0..10 {
                let coords = (row, col);
                if !mines.contains(&coords) && session.board().is_interactive(coords) {
                    last = Some(session.reveal(coords));
                }
            }
        }

        assert_eq!(last.unwrap().ended(), Some(true));
        assert_eq!(session.status(), GameStatus::Won);
        assert!(!session.clock.is_running());

        let summary = session.summary().unwrap();
        assert!(summary.won);
        assert_eq!(summary.mine_count, 10);

        let frozen = session.elapsed();
        assert_eq!(session.elapsed(), frozen);
        assert_eq!(summary.elapsed, frozen);
    }

    #[test]
    fn flag_mode_turns_clicks_into_flags() {
        let mut session = Session::new(Preset::Easy, 9);
        let mine = mines(&session)[0];

        assert!(session.toggle_flag_mode());
        let Interaction::Flag(mv) = session.interact(mine) else {
            panic!("expected a flag interaction");
        };
        assert_eq!(mv.outcome, FlagOutcome::Flagged);
        assert_eq!(session.board().correctly_flagged_count(), 1);

        assert!(!session.toggle_flag_mode());
        // the flag protects the mine from a normal click
        let Interaction::Reveal(mv) = session.interact(mine) else {
            panic!("expected a reveal interaction");
        };
        assert_eq!(mv.outcome, RevealOutcome::NoChange);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn interact_ignores_finished_games() {
        let mut session = Session::new(Preset::Easy, 11);
        let mine = mines(&session)[0];
        session.reveal(mine);

        assert_eq!(session.interact((0, 0)), Interaction::Ignored);
        assert_eq!(session.interact(mine), Interaction::Ignored);
    }

    #[test]
    fn restart_deals_a_fresh_board() {
        let mut session = Session::new(Preset::Easy, 3);
        let first = mines(&session);
        session.toggle_flag_mode();
        session.reveal(first[0]);

        session.restart();

        assert_eq!(session.status(), GameStatus::NotStarted);
        assert_eq!(session.board().revealed_safe_count(), 0);
        assert_eq!(session.board().flagged_count(), 0);
        assert!(session.summary().is_none());
        assert!(!session.flag_mode());
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(mines(&session).len(), 10);
    }
}

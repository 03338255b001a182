use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines on a {size}x{size} board")]
    InvalidConfiguration { size: Coord, mines: CellCount },
    #[error("Unknown preset {0:?}, expected one of easy, normal, hard")]
    UnknownPreset(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

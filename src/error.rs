use std::io;

use thiserror::Error;

use crate::arena::Position;

/// Errors surfaced by the game library.
#[derive(Debug, Error)]
pub enum GameError {
    /// The render surface could not be brought up.
    #[error("failed to initialize the terminal: {0}")]
    Initialization(#[source] io::Error),

    /// The terminal leaves no room for at least two playable cells.
    #[error("terminal too small: arena of {height}x{width} has fewer than two playable cells")]
    ArenaTooSmall { height: u16, width: u16 },

    /// A round was laid out with the cursor and target off the interior or
    /// on the same cell.
    #[error("invalid round layout: cursor {cursor:?}, target {target:?}")]
    InvalidLayout { cursor: Position, target: Position },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

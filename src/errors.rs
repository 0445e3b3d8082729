//! Crate-wide error types.
//!
//! Construction-time validation failures surface here; gameplay outcomes
//! (illegal moves, stalemate, insufficient material) are reported through
//! boolean or `Option` query results instead.

use std::error::Error;
use std::fmt;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Piece identifiers live in `0..=31`.
    PieceIdOutOfRange(u8),
    /// Board coordinates live in `0..8` on both axes.
    CoordinateOutOfBounds { x: u8, y: u8 },
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::PieceIdOutOfRange(id) => {
                write!(f, "piece id out of range: {id}")
            }
            ChessError::CoordinateOutOfBounds { x, y } => {
                write!(f, "board coordinate out of bounds: ({x}, {y})")
            }
        }
    }
}

impl Error for ChessError {}

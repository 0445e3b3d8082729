//! Piece records stored in the board grid.

use crate::board::chess_types::{Color, PieceKind, Square, BOARD_SIZE};
use crate::errors::{ChessError, ChessResult};

/// Highest valid piece identifier; a full game never holds more than 32
/// pieces.
pub const MAX_PIECE_ID: u8 = 31;

/// A single piece on the board.
///
/// Identity is `(kind, color, id)`; the position and `has_moved` flag are
/// mutable bookkeeping and do not participate in equality. `has_moved` is
/// monotonic: it flips to `true` when a move commits and never returns to
/// `false` on a live piece.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    pub id: u8,
    pub kind: PieceKind,
    pub color: Color,
    pub position: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(id: u8, kind: PieceKind, color: Color, position: Square) -> ChessResult<Self> {
        if id > MAX_PIECE_ID {
            return Err(ChessError::PieceIdOutOfRange(id));
        }
        if position.x >= BOARD_SIZE || position.y >= BOARD_SIZE {
            return Err(ChessError::CoordinateOutOfBounds {
                x: position.x,
                y: position.y,
            });
        }
        Ok(Self {
            id,
            kind,
            color,
            position,
            has_moved: false,
        })
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Whether this piece can still take part in castling.
    #[inline]
    pub fn can_castle(&self) -> bool {
        matches!(self.kind, PieceKind::King | PieceKind::Rook) && !self.has_moved
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.color == other.color && self.id == other.id
    }
}

impl Eq for Piece {}

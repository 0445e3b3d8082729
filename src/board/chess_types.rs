//! Core board vocabulary: colors, piece kinds, and squares.
//!
//! Piece movement shapes are carried here as plain static tables so the move
//! generator can stay a single table-driven walk instead of dispatching over
//! per-kind types.

use crate::errors::{ChessError, ChessResult};

pub use crate::board::piece::Piece;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Single-step offsets for leaping pieces, expressed from White's point of
/// view; Black's are obtained by negation.
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const PAWN_STEPS: [(i8, i8); 3] = [(0, 1), (1, 1), (-1, 1)];

const PAWN_STEPS_FIRST: [(i8, i8); 4] = [(0, 2), (0, 1), (1, 1), (-1, 1)];

/// Ray directions for sliding pieces; each listed direction is walked both
/// ways, so only half the compass is stored.
const ROOK_RAYS: [(i8, i8); 2] = [(0, 1), (1, 0)];

const BISHOP_RAYS: [(i8, i8); 2] = [(1, 1), (1, -1)];

const QUEEN_RAYS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Piece kind (color is represented separately on the piece record).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value used by the heuristic engine.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 4,
        }
    }

    /// Step table for leaping pieces. Pawns get the extended table while
    /// they still sit on their starting square. Sliders return `None`.
    #[inline]
    pub(crate) fn leap_offsets(self, first_move: bool) -> Option<&'static [(i8, i8)]> {
        match self {
            PieceKind::Pawn if first_move => Some(&PAWN_STEPS_FIRST),
            PieceKind::Pawn => Some(&PAWN_STEPS),
            PieceKind::Knight => Some(&KNIGHT_STEPS),
            PieceKind::King => Some(&KING_STEPS),
            _ => None,
        }
    }

    /// Half-compass ray table for sliding pieces; leapers return `None`.
    #[inline]
    pub(crate) fn ray_directions(self) -> Option<&'static [(i8, i8)]> {
        match self {
            PieceKind::Rook => Some(&ROOK_RAYS),
            PieceKind::Bishop => Some(&BISHOP_RAYS),
            PieceKind::Queen => Some(&QUEEN_RAYS),
            _ => None,
        }
    }
}

/// Board coordinate. `(0, 0)` is the a1 corner; White pawns advance `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub fn new(x: u8, y: u8) -> ChessResult<Self> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(ChessError::CoordinateOutOfBounds { x, y });
        }
        Ok(Self { x, y })
    }

    /// In-bounds constructor for literal coordinates known to be `0..8`.
    #[inline]
    pub(crate) const fn at(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Bounds-checked translation; the only coordinate arithmetic entry
    /// point used by the move generator.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        if (0..BOARD_SIZE as i8).contains(&x) && (0..BOARD_SIZE as i8).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }
}

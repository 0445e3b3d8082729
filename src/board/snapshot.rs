//! Deep board snapshots for simulation and undo.
//!
//! A snapshot is a plain value copy with no aliasing back into the live
//! board, so restoring after a speculative line is total and all-or-nothing.

use crate::board::board_state::{Board, Grid};
use crate::board::chess_types::Color;
use crate::board::piece::Piece;

/// Full copy of a board's externally observable state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub shadow: Grid,
    pub last_moved: Color,
    pub captured_white: Vec<Piece>,
    pub captured_black: Vec<Piece>,
    pub rules_enforced: bool,
    pub en_passant_active: bool,
}

impl Snapshot {
    pub fn of(board: &Board) -> Self {
        Self {
            grid: board.grid,
            shadow: board.shadow,
            last_moved: board.last_moved,
            captured_white: board.captured_white.clone(),
            captured_black: board.captured_black.clone(),
            rules_enforced: board.rules_enforced,
            en_passant_active: board.en_passant_active,
        }
    }

    /// Placement-only comparison: two snapshots describe the same position
    /// when every square holds the same kind and color of piece. Identity,
    /// movement flags, and capture lists are deliberately ignored; this is
    /// the comparison the repetition detector needs.
    pub fn same_position(&self, other: &Snapshot) -> bool {
        for y in 0..8 {
            for x in 0..8 {
                let a = self.grid[y][x].map(|p| (p.kind, p.color));
                let b = other.grid[y][x].map(|p| (p.kind, p.color));
                if a != b {
                    return false;
                }
            }
        }
        true
    }
}

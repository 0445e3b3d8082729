//! Castling eligibility.
//!
//! The caller guarantees the king has never moved. For each horizontal
//! direction the two squares the king crosses must be unattacked, and the
//! first occupied square scanning from the king toward the board edge must
//! be a rook that has never moved. Ineligible directions are skipped
//! silently; the rook relocation itself happens in `apply_move`.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::move_generation::check;

pub(crate) fn append_castling_moves(
    board: &mut Board,
    king_sq: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    for dir in [1i8, -1] {
        let Some(step_one) = king_sq.offset(dir, 0) else {
            continue;
        };
        let Some(step_two) = step_one.offset(dir, 0) else {
            continue;
        };
        if check::square_attacked(board, step_one, color)
            || check::square_attacked(board, step_two, color)
        {
            continue;
        }

        let mut cursor = king_sq;
        while let Some(next) = cursor.offset(dir, 0) {
            if let Some(found) = board.piece_at(next) {
                if found.kind == PieceKind::Rook && found.can_castle() {
                    out.push(step_two);
                }
                break;
            }
            cursor = next;
        }
    }
}

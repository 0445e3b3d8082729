//! King safety trial filter.
//!
//! Candidate moves are tried in place on the caller's scratch board: stash
//! both squares, make the move, probe the king, put everything back. The
//! restore path is unconditional and linear, so the scratch board is
//! identical before and after every trial.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::board::piece::Piece;
use crate::move_generation::check;

/// Whether moving `from` to `to` leaves the `color` king unattacked.
/// A board with no king of that color counts as safe.
pub(crate) fn keeps_king_safe(board: &mut Board, from: Square, to: Square, color: Color) -> bool {
    let mover = board.cell(from).take();
    let displaced = board.cell(to).take();

    // An en-passant trial also lifts the victim pawn, which stands beside
    // the mover rather than on the destination and could otherwise mask a
    // discovered attack.
    let mut passant_lift: Option<(Square, Option<Piece>)> = None;
    let is_pawn_capture =
        mover.is_some_and(|p| p.kind == PieceKind::Pawn) && from.x != to.x && displaced.is_none();
    if is_pawn_capture
        && board.en_passant_active
        && board
            .shadow_at(to)
            .is_some_and(|marker| marker.color != color)
    {
        let victim_sq = Square::at(to.x, from.y);
        let lifted = board.cell(victim_sq).take();
        passant_lift = Some((victim_sq, lifted));
    }

    *board.cell(to) = mover;

    let safe = match board.find_king(color) {
        Some(king_sq) => !check::square_attacked(board, king_sq, color),
        None => true,
    };

    let moved_back = board.cell(to).take();
    *board.cell(from) = moved_back;
    *board.cell(to) = displaced;
    if let Some((victim_sq, lifted)) = passant_lift {
        *board.cell(victim_sq) = lifted;
    }
    safe
}

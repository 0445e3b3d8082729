//! The check probe.
//!
//! `square_attacked` answers "would the `color` king be in trouble on this
//! square". The probed square's occupant is parked in the shadow grid for
//! the duration, and so is the real king when it stands elsewhere, so
//! neither can mask an attacking ray. Enemy reach is computed from raw shape
//! moves; the probe never consults the legality filter, so there is no
//! recursion between the two.
//!
//! The probe is only meaningful for the side to move. Asked about the
//! waiting color it answers `false`, which also makes every trial filter
//! built on top of it inert for that color.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::board::piece::Piece;
use crate::move_generation::movegen;

/// Whether any enemy of `color` can strike `square`.
pub(crate) fn square_attacked(board: &mut Board, square: Square, color: Color) -> bool {
    if color != board.turn() {
        return false;
    }

    let mut parked = [None::<Square>; 2];
    match board.piece_at(square).copied() {
        Some(occupant) if occupant.kind == PieceKind::King && occupant.color != color => {
            // The enemy king is never a check target.
            return false;
        }
        Some(occupant) if occupant.kind == PieceKind::King => {
            park(board, square, &mut parked);
        }
        Some(_) => {
            // Any other occupant is lifted, and the real king too so it
            // cannot block a ray onto its own destination.
            park(board, square, &mut parked);
            if let Some(king_sq) = board.find_king(color) {
                park(board, king_sq, &mut parked);
            }
        }
        None => {
            if let Some(king_sq) = board.find_king(color) {
                park(board, king_sq, &mut parked);
            }
        }
    }

    let mut attacked = false;
    'scan: for y in 0..8u8 {
        for x in 0..8u8 {
            let origin = Square::at(x, y);
            let Some(attacker) = board.piece_at(origin).copied() else {
                continue;
            };
            if attacker.color == color {
                continue;
            }

            // Pawn capture squares only show up in shape moves when they
            // are occupied, so probe empty squares with a stand-in pawn.
            let needs_stand_in =
                attacker.kind == PieceKind::Pawn && board.piece_at(square).is_none();
            if needs_stand_in {
                *board.cell(square) = Some(stand_in_pawn(color, square));
            }
            let reaches = movegen::pseudo_destinations(board, origin).contains(&square);
            if needs_stand_in {
                *board.cell(square) = None;
            }

            if reaches {
                attacked = true;
                break 'scan;
            }
        }
    }

    unpark(board, &parked);
    attacked
}

fn stand_in_pawn(color: Color, square: Square) -> Piece {
    let mut pawn =
        Piece::new(0, PieceKind::Pawn, color, square).expect("stand-in parameters are in range");
    pawn.has_moved = true;
    pawn
}

fn park(board: &mut Board, square: Square, parked: &mut [Option<Square>; 2]) {
    let lifted = board.cell(square).take();
    *board.shadow_cell(square) = lifted;
    if parked[0].is_none() {
        parked[0] = Some(square);
    } else {
        parked[1] = Some(square);
    }
}

fn unpark(board: &mut Board, parked: &[Option<Square>; 2]) {
    for &square in parked.iter().flatten() {
        let lifted = board.shadow_cell(square).take();
        *board.cell(square) = lifted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_state::EMPTY_GRID;

    fn put(board: &mut Board, id: u8, kind: PieceKind, color: Color, x: u8, y: u8) {
        let mut piece = Piece::new(id, kind, color, Square::at(x, y))
            .expect("test pieces should construct");
        piece.has_moved = true;
        board.grid[y as usize][x as usize] = Some(piece);
    }

    fn bare_board() -> Board {
        let mut board = Board::standard();
        board.grid = EMPTY_GRID;
        board
    }

    #[test]
    fn a_rook_checks_along_an_open_file() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Rook, Color::Black, 4, 5);
        put(&mut board, 2, PieceKind::King, Color::Black, 0, 7);

        assert!(board.is_check(Square::at(4, 0), Color::White));

        // A blocker on the file lifts the check.
        put(&mut board, 3, PieceKind::Knight, Color::White, 4, 3);
        assert!(!board.is_check(Square::at(4, 0), Color::White));
    }

    #[test]
    fn the_probe_answers_only_for_the_side_to_move() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Rook, Color::Black, 4, 5);
        put(&mut board, 2, PieceKind::King, Color::Black, 0, 7);
        board.last_moved = Color::White;

        // Same position as above, but it is Black's move now.
        assert!(!board.is_check(Square::at(4, 0), Color::White));
    }

    #[test]
    fn pawns_attack_empty_diagonal_squares() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 4);
        put(&mut board, 1, PieceKind::Pawn, Color::Black, 3, 6);
        put(&mut board, 2, PieceKind::King, Color::Black, 0, 7);

        let moves = board.legal_moves(Square::at(4, 4));
        // Both diagonal capture squares of the pawn are off limits.
        assert!(!moves.contains(&Square::at(4, 5)));
        assert!(!moves.contains(&Square::at(2, 5)));
        // The square straight in front of the pawn is fine; pawns do not
        // attack forward.
        assert!(moves.contains(&Square::at(3, 5)));
    }

    #[test]
    fn the_kings_own_square_cannot_shield_its_destination() {
        // A rook "behind" the king along a rank still covers the square
        // the king would retreat to.
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Rook, Color::Black, 2, 0);
        put(&mut board, 2, PieceKind::King, Color::Black, 0, 7);

        let moves = board.legal_moves(Square::at(4, 0));
        assert!(!moves.contains(&Square::at(5, 0)), "retreat along the ray");
        assert!(!moves.contains(&Square::at(3, 0)), "stepping toward the rook");
        assert!(moves.contains(&Square::at(4, 1)), "leaving the rank");
    }

    #[test]
    fn probing_a_friendly_occupied_square_lifts_the_occupant() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Bishop, Color::White, 4, 2);
        put(&mut board, 2, PieceKind::Rook, Color::Black, 4, 5);
        put(&mut board, 3, PieceKind::King, Color::Black, 0, 7);

        let before = board.snapshot();
        assert!(square_attacked(&mut board, Square::at(4, 2), Color::White));
        assert!(board.snapshot().same_position(&before));
        for y in 0..8 {
            for x in 0..8 {
                assert!(board.shadow[y][x].is_none(), "shadow left at ({x}, {y})");
            }
        }
    }

    #[test]
    fn the_probe_restores_every_parked_piece() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Queen, Color::Black, 4, 5);
        put(&mut board, 2, PieceKind::King, Color::Black, 0, 7);

        let before = board.snapshot();
        // Probing a capture parks both the victim and the king.
        let _ = square_attacked(&mut board, Square::at(4, 5), Color::White);
        assert!(board.snapshot().same_position(&before));
        for y in 0..8 {
            for x in 0..8 {
                assert!(board.shadow[y][x].is_none(), "shadow left at ({x}, {y})");
            }
        }
    }
}

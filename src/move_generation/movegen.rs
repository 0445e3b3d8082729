//! Table-driven move generation.
//!
//! Shapes come from the static step and ray tables on `PieceKind`; this
//! module adds occupancy rules, the pawn's capture asymmetry, the king
//! safety filter, and castling. Raw shape enumeration stays available to
//! the check probe, which must never recurse into the legality filter.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::board::piece::Piece;
use crate::move_generation::{castling, check, legality};

/// Every fully legal destination for the piece on `from`. An empty square
/// or an immobilized piece both yield an empty vector.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };

    // All speculative work happens on one private copy of the board.
    let mut scratch = board.clone();
    let pseudo = pseudo_destinations(&scratch, from);
    let mut out = Vec::with_capacity(pseudo.len());
    for dest in pseudo {
        let keep = if piece.kind == PieceKind::King {
            // King destinations go through the attack probe directly; the
            // probe lifts the king so it cannot shield the target square.
            !check::square_attacked(&mut scratch, dest, piece.color)
        } else {
            legality::keeps_king_safe(&mut scratch, from, dest, piece.color)
        };
        if keep {
            out.push(dest);
        }
    }

    if piece.kind == PieceKind::King && !piece.has_moved {
        castling::append_castling_moves(&mut scratch, from, piece.color, &mut out);
    }
    out
}

/// Shape-and-occupancy destinations with no king safety filtering.
pub(crate) fn pseudo_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };
    let mut out = Vec::new();

    if let Some(rays) = piece.kind.ray_directions() {
        for &(dx, dy) in rays {
            walk_ray(board, &piece, from, dx, dy, &mut out);
            walk_ray(board, &piece, from, -dx, -dy, &mut out);
        }
        return out;
    }

    let Some(offsets) = piece.kind.leap_offsets(!piece.has_moved) else {
        return out;
    };
    for &(dx, dy) in offsets {
        let (dx, dy) = match piece.color {
            Color::White => (dx, dy),
            Color::Black => (-dx, -dy),
        };
        let Some(dest) = from.offset(dx, dy) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn => pawn_step(board, &piece, from, dest, dx, dy, &mut out),
            _ => {
                let passable = board
                    .piece_at(dest)
                    .map_or(true, |other| other.color != piece.color);
                if passable {
                    out.push(dest);
                }
            }
        }
    }
    out
}

fn pawn_step(
    board: &Board,
    piece: &Piece,
    from: Square,
    dest: Square,
    dx: i8,
    dy: i8,
    out: &mut Vec<Square>,
) {
    if dx == 0 {
        // Straight pushes never capture; the double push also needs the
        // skipped square clear.
        if board.piece_at(dest).is_some() {
            return;
        }
        if dy.abs() == 2 {
            let Some(mid) = from.offset(0, dy / 2) else {
                return;
            };
            if board.piece_at(mid).is_some() {
                return;
            }
        }
        out.push(dest);
    } else {
        // Diagonals need an enemy piece, or an enemy marker while the
        // en-passant window is open.
        let capturable = match board.piece_at(dest) {
            Some(other) => other.color != piece.color,
            None => {
                board.en_passant_active
                    && board
                        .shadow_at(dest)
                        .is_some_and(|marker| marker.color != piece.color)
            }
        };
        if capturable {
            out.push(dest);
        }
    }
}

fn walk_ray(board: &Board, piece: &Piece, from: Square, dx: i8, dy: i8, out: &mut Vec<Square>) {
    let mut cursor = from;
    while let Some(next) = cursor.offset(dx, dy) {
        match board.piece_at(next) {
            Some(other) if other.color == piece.color => return,
            Some(_) => {
                out.push(next);
                return;
            }
            None => out.push(next),
        }
        cursor = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_state::{Board, EMPTY_GRID};
    use crate::board::chess_types::{Color, PieceKind, Square};
    use crate::board::piece::Piece;

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
    fn twenty_legal_moves_from_the_standard_start() {
        let board = Board::standard();
        let mut total = 0;
        for y in 0..8u8 {
            for x in 0..8u8 {
                let square = Square::at(x, y);
                if board
                    .piece_at(square)
                    .is_some_and(|p| p.color == Color::White)
                {
                    total += board.legal_moves(square).len();
                }
            }
        }
        assert_eq!(total, 20);
    }

    #[test]
    fn opening_knights_and_rooks() {
        let board = Board::standard();

        let knight_moves = board.legal_moves(Square::at(6, 0));
        assert_eq!(knight_moves.len(), 2);
        assert!(knight_moves.contains(&Square::at(5, 2)));
        assert!(knight_moves.contains(&Square::at(7, 2)));

        // Rooks are boxed in at the start.
        assert!(board.legal_moves(Square::at(0, 0)).is_empty());
    }

    #[test]
    fn sliders_stop_at_the_first_blocker() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 0, 0);
        put(&mut board, 1, PieceKind::Rook, Color::White, 3, 3);
        put(&mut board, 2, PieceKind::Pawn, Color::White, 3, 5);
        put(&mut board, 3, PieceKind::Knight, Color::Black, 6, 3);
        put(&mut board, 4, PieceKind::King, Color::Black, 0, 7);

        let moves = board.legal_moves(Square::at(3, 3));
        // Up the file: stops short of the friendly pawn.
        assert!(moves.contains(&Square::at(3, 4)));
        assert!(!moves.contains(&Square::at(3, 5)));
        // Across the rank: includes the enemy knight, nothing beyond it.
        assert!(moves.contains(&Square::at(6, 3)));
        assert!(!moves.contains(&Square::at(7, 3)));
    }

    #[test]
    fn a_pinned_rook_may_only_slide_along_the_pin() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 0);
        put(&mut board, 1, PieceKind::Rook, Color::White, 4, 2);
        put(&mut board, 2, PieceKind::Rook, Color::Black, 4, 6);
        put(&mut board, 3, PieceKind::King, Color::Black, 0, 7);

        let moves = board.legal_moves(Square::at(4, 2));
        let expected = [
            Square::at(4, 1),
            Square::at(4, 3),
            Square::at(4, 4),
            Square::at(4, 5),
            Square::at(4, 6),
        ];
        assert_eq!(moves.len(), expected.len());
        for square in expected {
            assert!(moves.contains(&square), "missing {square:?}");
        }
    }

    #[test]
    fn the_king_avoids_attacked_and_defended_squares() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 4, 4);
        put(&mut board, 1, PieceKind::Knight, Color::Black, 3, 3);
        put(&mut board, 2, PieceKind::Rook, Color::Black, 0, 5);
        put(&mut board, 3, PieceKind::King, Color::Black, 0, 7);

        let moves = board.legal_moves(Square::at(4, 4));
        // The whole fifth rank is covered by the rook.
        for x in 3..6u8 {
            assert!(!moves.contains(&Square::at(x, 5)), "({x}, 5) is attacked");
        }
        // Capturing the knight is fine; it is undefended.
        assert!(moves.contains(&Square::at(3, 3)));

        // Defend the knight and the capture disappears.
        put(&mut board, 4, PieceKind::Bishop, Color::Black, 1, 1);
        let moves = board.legal_moves(Square::at(4, 4));
        assert!(!moves.contains(&Square::at(3, 3)));
    }

    #[test]
    fn every_generated_move_survives_application() {
        let mut board = Board::standard();
        assert!(board.apply_move(Square::at(4, 1), Square::at(4, 3)));
        assert!(board.apply_move(Square::at(4, 6), Square::at(4, 4)));

        for y in 0..8u8 {
            for x in 0..8u8 {
                let from = Square::at(x, y);
                let Some(piece) = board.piece_at(from).copied() else {
                    continue;
                };
                if piece.color != Color::White {
                    continue;
                }
                for to in board.legal_moves(from) {
                    let mut sim = board.clone();
                    assert!(sim.apply_move(from, to), "{from:?} -> {to:?} was refused");

                    // No enemy shape move may reach the mover's king.
                    let king_sq = sim
                        .find_king(Color::White)
                        .expect("white king should survive");
                    for ey in 0..8u8 {
                        for ex in 0..8u8 {
                            let origin = Square::at(ex, ey);
                            if sim
                                .piece_at(origin)
                                .is_some_and(|p| p.color == Color::Black)
                            {
                                assert!(
                                    !pseudo_destinations(&sim, origin).contains(&king_sq),
                                    "{from:?} -> {to:?} leaves the king attacked from {origin:?}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn pawn_shapes_depend_on_color_and_history() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 0, 0);
        put(&mut board, 1, PieceKind::King, Color::Black, 7, 7);

        let mut fresh = Piece::new(16, PieceKind::Pawn, Color::White, Square::at(3, 1))
            .expect("pawn should construct");
        fresh.has_moved = false;
        board.grid[1][3] = Some(fresh);
        put(&mut board, 8, PieceKind::Pawn, Color::Black, 4, 2);

        let moves = board.legal_moves(Square::at(3, 1));
        assert!(moves.contains(&Square::at(3, 2)), "single push");
        assert!(moves.contains(&Square::at(3, 3)), "double push");
        assert!(moves.contains(&Square::at(4, 2)), "diagonal capture");
        assert!(!moves.contains(&Square::at(2, 2)), "empty diagonal");
        assert_eq!(moves.len(), 3);
    }
}

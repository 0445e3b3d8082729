//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view from the piece grid for the demo
//! binary, tests, and diagnostics in text environments.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};

/// Render the board to a Unicode string for terminal output, White's back
/// rank at the bottom.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for y in (0..8u8).rev() {
        out.push(char::from(b'1' + y));
        out.push(' ');

        for x in 0..8u8 {
            match board.piece_at(Square::new(x, y).expect("render coordinates are in range")) {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if x < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + y));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

//! Conversions between board squares and algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the
//! internal `Square` representation used by the demo binary and tests.

use crate::board::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(Square {
        x: file - b'a',
        y: rank - b'1',
    })
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square.x > 7 || square.y > 7 {
        return Err(format!(
            "Square out of bounds: ({}, {})",
            square.x, square.y
        ));
    }

    let file_char = char::from(b'a' + square.x);
    let rank_char = char::from(b'1' + square.y);
    Ok(format!("{file_char}{rank_char}"))
}

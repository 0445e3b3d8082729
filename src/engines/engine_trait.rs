//! Engine abstraction layer used by the game session.
//!
//! Defines the move payload and the common trait so different strategies
//! can be plugged into a session actor behind a single interface.

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, Square};

/// One chosen move, origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMove {
    pub from: Square,
    pub to: Square,
}

pub trait Engine: Send {
    /// The side this engine plays.
    fn color(&self) -> Color;

    /// Pick one move for this engine's color on the given position, or
    /// `None` when no piece of that color can move.
    fn select_move(&mut self, board: &Board) -> Option<SelectedMove>;
}

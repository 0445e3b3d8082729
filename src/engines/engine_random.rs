//! Random-move engine.
//!
//! Selects uniformly from all legal moves and is primarily used for
//! diagnostics, integration testing, and as a sparring partner.

use rand::prelude::IndexedRandom;

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, Square};
use crate::engines::engine_trait::{Engine, SelectedMove};

pub struct RandomEngine {
    color: Color,
}

impl RandomEngine {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Engine for RandomEngine {
    fn color(&self) -> Color {
        self.color
    }

    fn select_move(&mut self, board: &Board) -> Option<SelectedMove> {
        let mut candidates = Vec::new();
        for y in 0..8u8 {
            for x in 0..8u8 {
                let from = Square::at(x, y);
                let Some(piece) = board.piece_at(from) else {
                    continue;
                };
                if piece.color != self.color {
                    continue;
                }
                for to in board.legal_moves(from) {
                    candidates.push(SelectedMove { from, to });
                }
            }
        }

        let mut rng = rand::rng();
        candidates.as_slice().choose(&mut rng).copied()
    }
}

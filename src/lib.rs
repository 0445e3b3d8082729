//! Crate root module declarations for the Ivory Chess engine project.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! engines, the game session layer, and utility helpers) so binaries, tests,
//! and external tooling can import stable module paths.

pub mod board {
    pub mod board_state;
    pub mod chess_types;
    pub mod piece;
    pub mod snapshot;
}

pub mod move_generation {
    pub mod castling;
    pub mod check;
    pub mod legality;
    pub mod movegen;
}

pub mod engines {
    pub mod engine_heuristic;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game {
    pub mod session;
}

pub mod utils {
    pub mod algebraic;
    pub mod render_board;
}

pub mod errors;
pub mod repetition;

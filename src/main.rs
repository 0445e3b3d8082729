use std::time::Duration;

use ivory_chess::board::board_state::Board;
use ivory_chess::board::chess_types::Color;
use ivory_chess::engines::engine_heuristic::HeuristicEngine;
use ivory_chess::engines::engine_random::RandomEngine;
use ivory_chess::engines::engine_trait::{Engine, SelectedMove};
use ivory_chess::game::session::GameSession;
use ivory_chess::utils::algebraic::square_to_algebraic;
use ivory_chess::utils::render_board::render_board;

const MAX_PLIES: usize = 200;

/// Self-play demo: the foreground drives White with random moves while a
/// background actor answers for Black with the heuristic engine.
fn main() {
    let (session, events) = GameSession::new(Board::standard());
    let actor =
        GameSession::spawn_engine_actor(&session, Box::new(HeuristicEngine::new(Color::Black)));

    let mut white = RandomEngine::new(Color::White);
    let mut plies = 0usize;

    loop {
        if session.is_shutdown() {
            break;
        }

        if let Some(board) = session.board_snapshot() {
            if board.turn() == Color::White {
                match white.select_move(&board) {
                    Some(SelectedMove { from, to }) => {
                        session.apply_player_move(from, to);
                    }
                    None => {
                        println!("White has no moves left.");
                        break;
                    }
                }
            }
        }

        let Ok(event) = events.recv_timeout(Duration::from_secs(2)) else {
            continue;
        };
        plies += 1;

        let from = square_to_algebraic(event.from).unwrap_or_default();
        let to = square_to_algebraic(event.to).unwrap_or_default();
        println!("{:?} plays {from}{to}", event.color);

        if let Some(board) = session.board_snapshot() {
            println!("{}\n", render_board(&board));

            let side = board.turn();
            if board.is_stalemate(side) {
                let in_check = board
                    .find_king(side)
                    .is_some_and(|king_sq| board.is_check(king_sq, side));
                if in_check {
                    println!("Checkmate: {:?} wins.", board.last_moved);
                } else {
                    println!("Stalemate.");
                }
                break;
            }
            if !board.has_sufficient_material(Color::White)
                && !board.has_sufficient_material(Color::Black)
            {
                println!("Drawn: neither side can force mate.");
                break;
            }
        }

        if event.repetition {
            println!("Drawn by repetition.");
            break;
        }
        if plies >= MAX_PLIES {
            println!("Move limit reached.");
            break;
        }
    }

    session.request_shutdown();
    let _ = actor.join();
}

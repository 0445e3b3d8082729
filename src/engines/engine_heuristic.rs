//! Two-ply heuristic engine.
//!
//! Greedy material scoring with a handful of positional nudges: a
//! self-preservation pass rescues hanging pieces before anything else,
//! captures are scored at ten times material, pawns are nudged forward
//! early, and quiet moves borrow value from the best follow-up found on a
//! rules-off continuation board. All search runs on private clones; the
//! caller's board is never mutated.

use rand::prelude::IndexedRandom;

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::board::piece::Piece;
use crate::engines::engine_trait::{Engine, SelectedMove};

const CAPTURE_WEIGHT: i32 = 10;
const PROMOTION_SCORE: i32 = 90;
const PUSH_BONUS: i32 = 9;
const EARLY_ROOK_PENALTY: i32 = -2;
/// Selector calls before rooks may leave their corners freely.
const EARLY_GAME_MOVES: u32 = 10;
/// Selector calls during which a push to the fourth rank earns the bonus.
const OPENING_PUSH_MOVES: u32 = 4;

pub struct HeuristicEngine {
    color: Color,
    move_counter: u32,
}

impl HeuristicEngine {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            move_counter: 0,
        }
    }

    /// Flee move for a hanging piece: non-pawn, attackable next ply, and
    /// with no friendly recapture behind it.
    fn escape_capture(&self, board: &Board, from: Square) -> Option<SelectedMove> {
        let piece = board.piece_at(from)?;
        if piece.kind == PieceKind::Pawn {
            return None;
        }
        if !threatened_by_enemy(board, self.color, from) {
            return None;
        }
        if self.is_defended(board, from) {
            return None;
        }

        let moves = board.legal_moves(from);
        if moves.is_empty() {
            return None;
        }
        let scores = self.score_moves(board, from, &moves);
        let pick = pick_best(&scores)?;
        Some(SelectedMove {
            from,
            to: moves[pick],
        })
    }

    /// Defense test by substitution: drop an enemy queen on the square and
    /// ask whether any friendly piece could take her back. Straight pawn
    /// pushes do not count as recaptures.
    fn is_defended(&self, board: &Board, square: Square) -> bool {
        let mut sim = board.clone();
        let occupant_id = sim.piece_at(square).map_or(0, |p| p.id);
        let mut bait = Piece::new(occupant_id, PieceKind::Queen, self.color.opposite(), square)
            .expect("bait parameters are in range");
        bait.has_moved = true;
        *sim.cell(square) = Some(bait);

        for y in 0..8u8 {
            for x in 0..8u8 {
                let origin = Square::at(x, y);
                if origin == square {
                    continue;
                }
                let Some(friend) = sim.piece_at(origin) else {
                    continue;
                };
                if friend.color != self.color {
                    continue;
                }
                let takes_back = sim.legal_moves(origin).contains(&square)
                    && (friend.kind != PieceKind::Pawn || origin.x != square.x);
                if takes_back {
                    return true;
                }
            }
        }
        false
    }

    /// First-ply score for each candidate destination of the piece on
    /// `from`. Indices line up with `moves`.
    fn score_moves(&self, board: &Board, from: Square, moves: &[Square]) -> Vec<i32> {
        let mut scores = vec![0i32; moves.len()];
        let Some(piece) = board.piece_at(from).copied() else {
            return scores;
        };

        for (i, &to) in moves.iter().enumerate() {
            let mut sim = board.clone();
            let target_value = sim.piece_at(to).map(|p| p.value());

            scores[i] = match piece.kind {
                PieceKind::Pawn => {
                    let mut score = match target_value {
                        Some(value) => value * CAPTURE_WEIGHT,
                        None if self.push_bonus_applies(piece.color, to) => PUSH_BONUS,
                        None => 0,
                    };
                    if to.y == 0 || to.y == 7 {
                        score = PROMOTION_SCORE;
                    }
                    score
                }
                PieceKind::Rook if !piece.has_moved && self.move_counter < EARLY_GAME_MOVES => {
                    EARLY_ROOK_PENALTY
                }
                _ => target_value.map_or(0, |value| value * CAPTURE_WEIGHT),
            };

            if !sim.apply_move(from, to) {
                continue;
            }

            // One recapture penalty when the enemy can land on our new
            // square, waived for an even pawn trade.
            if enemy_reply_hits(&sim, self.color, to) {
                let pawn_for_pawn = piece.kind == PieceKind::Pawn && scores[i] == CAPTURE_WEIGHT;
                if !pawn_for_pawn {
                    scores[i] -= piece.value() * CAPTURE_WEIGHT;
                }
            }

            // Quiet moves look one ply further on a rules-off board.
            if scores[i] == 0 {
                scores[i] += self.best_continuation(&sim, to);
            }
        }
        scores
    }

    /// Best follow-up value for the piece now standing on `at`, scored at
    /// face value rather than capture weight. Can go negative.
    fn best_continuation(&self, after_first: &Board, at: Square) -> i32 {
        let Some(piece) = after_first.piece_at(at).copied() else {
            return 0;
        };
        let follow_ups = after_first.legal_moves(at);
        if follow_ups.is_empty() {
            return 0;
        }

        let mut best = i32::MIN;
        for &to in &follow_ups {
            let mut sim = after_first.clone();
            sim.disable_rules();
            let target_value = sim.piece_at(to).map(|p| p.value());

            let mut score = target_value.unwrap_or(0);
            if piece.kind == PieceKind::Pawn && (to.y == 0 || to.y == 7) {
                score += PUSH_BONUS;
            }

            if sim.apply_move(at, to) && enemy_reply_hits(&sim, self.color, to) {
                let pawn_for_pawn = piece.kind == PieceKind::Pawn && score == 1;
                if !pawn_for_pawn {
                    score -= piece.value();
                }
            }

            best = best.max(score);
        }
        best
    }

    fn push_bonus_applies(&self, color: Color, to: Square) -> bool {
        let (fifth_rank, fourth_rank) = match color {
            Color::White => (4, 3),
            Color::Black => (3, 4),
        };
        to.y == fifth_rank || (to.y == fourth_rank && self.move_counter < OPENING_PUSH_MOVES)
    }
}

impl Engine for HeuristicEngine {
    fn color(&self) -> Color {
        self.color
    }

    fn select_move(&mut self, board: &Board) -> Option<SelectedMove> {
        let mut best_per_piece: Vec<(SelectedMove, i32)> = Vec::new();

        for y in 0..8u8 {
            for x in 0..8u8 {
                let from = Square::at(x, y);
                let Some(piece) = board.piece_at(from) else {
                    continue;
                };
                if piece.color != self.color {
                    continue;
                }

                // A hanging piece overrides everything else.
                if let Some(escape) = self.escape_capture(board, from) {
                    self.move_counter += 1;
                    return Some(escape);
                }

                let moves = board.legal_moves(from);
                if moves.is_empty() {
                    continue;
                }
                let scores = self.score_moves(board, from, &moves);
                let Some(pick) = pick_best(&scores) else {
                    continue;
                };
                best_per_piece.push((
                    SelectedMove {
                        from,
                        to: moves[pick],
                    },
                    scores[pick],
                ));
            }
        }

        let overall: Vec<i32> = best_per_piece.iter().map(|(_, score)| *score).collect();
        let pick = pick_best(&overall)?;
        self.move_counter += 1;
        Some(best_per_piece[pick].0)
    }
}

/// Index of the highest score, breaking ties uniformly at random.
fn pick_best(scores: &[i32]) -> Option<usize> {
    let mut best = i32::MIN;
    let mut tied: Vec<usize> = Vec::new();
    for (i, &score) in scores.iter().enumerate() {
        if score > best {
            best = score;
            tied.clear();
        }
        if score == best {
            tied.push(i);
        }
    }
    let mut rng = rand::rng();
    tied.as_slice().choose(&mut rng).copied()
}

/// Whether any enemy move lands on `square` in the current position.
fn enemy_reply_hits(board: &Board, color: Color, square: Square) -> bool {
    for y in 0..8u8 {
        for x in 0..8u8 {
            let origin = Square::at(x, y);
            let Some(enemy) = board.piece_at(origin) else {
                continue;
            };
            if enemy.color == color {
                continue;
            }
            if board.legal_moves(origin).contains(&square) {
                return true;
            }
        }
    }
    false
}

/// Whether any enemy move can capture the piece on `square`. Straight
/// pawn pushes onto the square are not captures.
fn threatened_by_enemy(board: &Board, color: Color, square: Square) -> bool {
    for y in 0..8u8 {
        for x in 0..8u8 {
            let origin = Square::at(x, y);
            let Some(enemy) = board.piece_at(origin) else {
                continue;
            };
            if enemy.color == color {
                continue;
            }
            let hits = board.legal_moves(origin).contains(&square)
                && (enemy.kind != PieceKind::Pawn || origin.x != square.x);
            if hits {
                return true;
            }
        }
    }
    false
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
    fn opens_with_a_double_pawn_push() {
        let board = Board::standard();
        let mut engine = HeuristicEngine::new(Color::White);
        let picked = engine
            .select_move(&board)
            .expect("white should have moves at the start");

        let mover = board
            .piece_at(picked.from)
            .expect("the chosen origin should be occupied");
        assert_eq!(mover.kind, PieceKind::Pawn);
        assert_eq!(picked.to.y, 3, "the push bonus favors the fourth rank");

        let mut board = board;
        assert!(board.apply_move(picked.from, picked.to));
    }

    #[test]
    fn rescues_a_hanging_knight() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 0, 0);
        put(&mut board, 1, PieceKind::Knight, Color::White, 4, 4);
        put(&mut board, 16, PieceKind::Pawn, Color::White, 1, 1);
        put(&mut board, 2, PieceKind::King, Color::Black, 7, 7);
        put(&mut board, 3, PieceKind::Rook, Color::Black, 4, 6);

        let mut engine = HeuristicEngine::new(Color::White);
        let picked = engine
            .select_move(&board)
            .expect("white should have moves");
        assert_eq!(picked.from, Square::at(4, 4), "the knight must flee");
    }

    #[test]
    fn takes_a_hanging_rook() {
        let mut board = bare_board();
        put(&mut board, 0, PieceKind::King, Color::White, 0, 0);
        put(&mut board, 1, PieceKind::Queen, Color::White, 3, 3);
        put(&mut board, 2, PieceKind::King, Color::Black, 7, 7);
        put(&mut board, 3, PieceKind::Rook, Color::Black, 3, 6);

        let mut engine = HeuristicEngine::new(Color::White);
        let picked = engine
            .select_move(&board)
            .expect("white should have moves");
        assert_eq!(picked.from, Square::at(3, 3));
        assert_eq!(picked.to, Square::at(3, 6), "the queen takes the rook");
    }

    #[test]
    fn leaves_the_caller_board_untouched() {
        let board = Board::standard();
        let before = board.snapshot();

        let mut engine = HeuristicEngine::new(Color::White);
        engine.select_move(&board).expect("a move should exist");

        assert!(board.snapshot().same_position(&before));
        assert_eq!(board.turn(), Color::White);
        assert!(board.captured_white.is_empty());
        assert!(board.captured_black.is_empty());
    }

    #[test]
    fn reports_none_with_no_material() {
        let board = bare_board();
        let mut engine = HeuristicEngine::new(Color::White);
        assert!(engine.select_move(&board).is_none());
    }
}

//! Threefold-style repetition detection.
//!
//! One snapshot is recorded per applied move. Once eight are on file, the
//! last four positions are compared pairwise against the four before them;
//! four matches in a row mean both players are shuffling in place.

use crate::board::board_state::Board;
use crate::board::snapshot::Snapshot;

const WINDOW: usize = 8;

#[derive(Debug, Default)]
pub struct RepetitionTracker {
    snapshots: Vec<Snapshot>,
}

impl RepetitionTracker {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Records the position after a move and reports whether the game has
    /// fallen into a repeating cycle.
    pub fn observe(&mut self, board: &Board) -> bool {
        self.snapshots.push(board.snapshot());
        let n = self.snapshots.len();
        if n < WINDOW {
            return false;
        }
        (0..WINDOW / 2).all(|i| {
            self.snapshots[n - 1 - i].same_position(&self.snapshots[n - 1 - i - WINDOW / 2])
        })
    }

    /// Drops the most recent entry; undo support.
    pub fn retract(&mut self) {
        self.snapshots.pop();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::chess_types::Square;

    /// Knight shuffle: both sides bounce a knight out and back twice.
    const SHUFFLE: [(Square, Square); 8] = [
        (Square::at(6, 0), Square::at(5, 2)),
        (Square::at(6, 7), Square::at(5, 5)),
        (Square::at(5, 2), Square::at(6, 0)),
        (Square::at(5, 5), Square::at(6, 7)),
        (Square::at(6, 0), Square::at(5, 2)),
        (Square::at(6, 7), Square::at(5, 5)),
        (Square::at(5, 2), Square::at(6, 0)),
        (Square::at(5, 5), Square::at(6, 7)),
    ];

    #[test]
    fn a_full_shuffle_cycle_reports_repetition_exactly_at_eight() {
        let mut board = Board::standard();
        let mut tracker = RepetitionTracker::new();

        for (ply, (from, to)) in SHUFFLE.into_iter().enumerate() {
            assert!(board.apply_move(from, to), "ply {ply} should be legal");
            let repeated = tracker.observe(&board);
            if ply < 7 {
                assert!(!repeated, "ply {ply} reported repetition too early");
            } else {
                assert!(repeated, "the eighth ply should report repetition");
            }
        }
    }

    #[test]
    fn diverging_play_never_reports_repetition() {
        let mut board = Board::standard();
        let mut tracker = RepetitionTracker::new();

        // Six shuffle plies, then a pawn push breaks the cycle.
        for (from, to) in SHUFFLE.into_iter().take(6) {
            assert!(board.apply_move(from, to));
            assert!(!tracker.observe(&board));
        }
        assert!(board.apply_move(Square::at(4, 1), Square::at(4, 3)));
        assert!(!tracker.observe(&board));
        assert!(board.apply_move(Square::at(4, 6), Square::at(4, 4)));
        assert!(!tracker.observe(&board));
    }

    #[test]
    fn retract_unwinds_the_history() {
        let mut board = Board::standard();
        let mut tracker = RepetitionTracker::new();

        assert!(board.apply_move(Square::at(6, 0), Square::at(5, 2)));
        tracker.observe(&board);
        assert_eq!(tracker.len(), 1);

        tracker.retract();
        assert!(tracker.is_empty());
    }
}

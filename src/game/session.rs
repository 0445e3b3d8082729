//! Shared game session and engine actors.
//!
//! One mutex-guarded board plus a condvar turn signal. Each engine runs on
//! its own thread: it waits for its turn, clones a private copy of the
//! position, searches off-lock, then re-locks and applies exactly one move.
//! Every applied move is recorded with the repetition tracker and announced
//! on an mpsc event channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::thread;

use crate::board::board_state::Board;
use crate::board::chess_types::{Color, Square};
use crate::engines::engine_trait::Engine;
use crate::repetition::RepetitionTracker;

/// Announcement of one applied move.
#[derive(Debug, Clone, Copy)]
pub struct MoveApplied {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// The position has fallen into a repeating cycle.
    pub repetition: bool,
}

struct SessionState {
    board: Board,
    history: RepetitionTracker,
}

pub struct GameSession {
    state: Mutex<SessionState>,
    turn_signal: Condvar,
    shutdown: AtomicBool,
    events: Mutex<mpsc::Sender<MoveApplied>>,
}

impl GameSession {
    pub fn new(board: Board) -> (Arc<Self>, mpsc::Receiver<MoveApplied>) {
        let (tx, rx) = mpsc::channel();
        let session = Arc::new(Self {
            state: Mutex::new(SessionState {
                board,
                history: RepetitionTracker::new(),
            }),
            turn_signal: Condvar::new(),
            shutdown: AtomicBool::new(false),
            events: Mutex::new(tx),
        });
        (session, rx)
    }

    /// Private copy of the current position for rendering or search.
    pub fn board_snapshot(&self) -> Option<Board> {
        let Ok(guard) = self.state.lock() else {
            return None;
        };
        Some(guard.board.clone())
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Stops every actor; idempotent.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.turn_signal.notify_all();
    }

    /// Applies a foreground move, promoting any pawn that reached its back
    /// rank, and wakes waiting actors. Returns whether the move took.
    pub fn apply_player_move(&self, from: Square, to: Square) -> bool {
        let Ok(mut guard) = self.state.lock() else {
            return false;
        };
        if !guard.board.apply_move(from, to) {
            return false;
        }
        guard.board.promote_pawn(to);
        let color = guard.board.last_moved;
        let state = &mut *guard;
        let repetition = state.history.observe(&state.board);
        drop(guard);

        self.announce(MoveApplied {
            color,
            from,
            to,
            repetition,
        });
        true
    }

    fn announce(&self, event: MoveApplied) {
        if let Ok(tx) = self.events.lock() {
            let _ = tx.send(event);
        }
        self.turn_signal.notify_all();
    }

    /// Runs `engine` on its own thread, one move per turn, until shutdown
    /// or until the engine reports it has no move left.
    pub fn spawn_engine_actor(
        session: &Arc<Self>,
        mut engine: Box<dyn Engine>,
    ) -> thread::JoinHandle<()> {
        let session = Arc::clone(session);
        thread::spawn(move || loop {
            // Wait for our turn, then take a private copy of the position.
            let private = {
                let Ok(mut guard) = session.state.lock() else {
                    return;
                };
                while guard.board.turn() != engine.color() && !session.is_shutdown() {
                    let Ok(next) = session.turn_signal.wait(guard) else {
                        return;
                    };
                    guard = next;
                }
                if session.is_shutdown() {
                    return;
                }
                guard.board.clone()
            };

            // Search runs with the lock released.
            let Some(selected) = engine.select_move(&private) else {
                session.request_shutdown();
                return;
            };

            let event = {
                let Ok(mut guard) = session.state.lock() else {
                    return;
                };
                if session.is_shutdown() {
                    return;
                }
                // The position may have changed while we searched.
                if guard.board.turn() != engine.color() {
                    continue;
                }
                if !guard.board.apply_move(selected.from, selected.to) {
                    continue;
                }
                guard.board.promote_pawn(selected.to);
                let state = &mut *guard;
                let repetition = state.history.observe(&state.board);
                MoveApplied {
                    color: engine.color(),
                    from: selected.from,
                    to: selected.to,
                    repetition,
                }
            };
            session.announce(event);
        })
    }
}

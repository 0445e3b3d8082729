//! Authoritative board state and the move application pipeline.
//!
//! The board owns every live piece in an 8x8 grid plus a shadow grid that
//! carries en-passant markers and the check probe's parking squares. All
//! mutation funnels through `apply_move`, which either commits a full legal
//! move or leaves the board byte-for-byte untouched.

use crate::board::chess_types::{Color, PieceKind, Square};
use crate::board::piece::{Piece, MAX_PIECE_ID};
use crate::board::snapshot::Snapshot;
use crate::move_generation::{check, movegen};

pub type Grid = [[Option<Piece>; 8]; 8];

pub(crate) const EMPTY_GRID: Grid = [[None; 8]; 8];

const BACK_RANK_KINDS: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Initial piece layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSetup {
    /// Regulation starting position.
    Standard,
    /// Regulation officers with each side's pawns on the far side.
    SwappedPawns,
    /// Officers only.
    NoPawns,
    /// Regulation layout with rule enforcement switched off.
    Sandbox,
}

#[derive(Debug, Clone)]
pub struct Board {
    pub grid: Grid,
    /// En-passant markers and the check probe's temporary parking spots.
    pub shadow: Grid,
    /// Color that made the most recent move; starts as Black so White opens.
    pub last_moved: Color,
    pub captured_white: Vec<Piece>,
    pub captured_black: Vec<Piece>,
    pub rules_enforced: bool,
    pub en_passant_active: bool,
}

impl Board {
    pub fn standard() -> Self {
        Self::with_setup(BoardSetup::Standard)
    }

    pub fn with_setup(setup: BoardSetup) -> Self {
        let mut board = Self {
            grid: EMPTY_GRID,
            shadow: EMPTY_GRID,
            last_moved: Color::Black,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            rules_enforced: setup != BoardSetup::Sandbox,
            en_passant_active: false,
        };

        let mut next_id = MAX_PIECE_ID;
        match setup {
            BoardSetup::Standard | BoardSetup::Sandbox => {
                board.fill_back_rank(0, Color::White, &mut next_id);
                board.fill_pawn_rank(1, Color::White, &mut next_id);
                board.fill_pawn_rank(6, Color::Black, &mut next_id);
                board.fill_back_rank(7, Color::Black, &mut next_id);
            }
            BoardSetup::SwappedPawns => {
                board.fill_back_rank(0, Color::White, &mut next_id);
                board.fill_pawn_rank(1, Color::Black, &mut next_id);
                board.fill_pawn_rank(6, Color::White, &mut next_id);
                board.fill_back_rank(7, Color::Black, &mut next_id);
            }
            BoardSetup::NoPawns => {
                board.fill_back_rank(0, Color::White, &mut next_id);
                board.fill_back_rank(7, Color::Black, &mut next_id);
            }
        }
        board
    }

    fn fill_back_rank(&mut self, y: u8, color: Color, next_id: &mut u8) {
        for (x, kind) in BACK_RANK_KINDS.into_iter().enumerate() {
            self.place_initial(kind, color, Square::at(x as u8, y), next_id);
        }
    }

    fn fill_pawn_rank(&mut self, y: u8, color: Color, next_id: &mut u8) {
        for x in 0..8 {
            self.place_initial(PieceKind::Pawn, color, Square::at(x, y), next_id);
        }
    }

    fn place_initial(&mut self, kind: PieceKind, color: Color, square: Square, next_id: &mut u8) {
        let piece = Piece::new(*next_id, kind, color, square)
            .expect("setup ids and coordinates are in range");
        *next_id = next_id.wrapping_sub(1);
        *self.cell(square) = Some(piece);
    }

    /// Color whose turn it is.
    #[inline]
    pub fn turn(&self) -> Color {
        self.last_moved.opposite()
    }

    /// Switches off legality, turn order, and self-check enforcement.
    pub fn disable_rules(&mut self) {
        self.rules_enforced = false;
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid[square.y as usize][square.x as usize].as_ref()
    }

    #[inline]
    pub fn shadow_at(&self, square: Square) -> Option<&Piece> {
        self.shadow[square.y as usize][square.x as usize].as_ref()
    }

    #[inline]
    pub(crate) fn cell(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.grid[square.y as usize][square.x as usize]
    }

    #[inline]
    pub(crate) fn shadow_cell(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.shadow[square.y as usize][square.x as usize]
    }

    /// Grid square of the first live king of `color`, if any.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for y in 0..8u8 {
            for x in 0..8u8 {
                let square = Square::at(x, y);
                if let Some(piece) = self.piece_at(square) {
                    if piece.kind == PieceKind::King && piece.color == color {
                        return Some(square);
                    }
                }
            }
        }
        None
    }

    /// Every legal destination for the piece on `from`; empty when the
    /// square is empty or the piece cannot move.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        movegen::legal_destinations(self, from)
    }

    /// Whether `square` would leave the `color` king attacked. Answered
    /// only for the side to move; the probe reports `false` for the
    /// waiting side.
    pub fn is_check(&self, square: Square, color: Color) -> bool {
        let mut scratch = self.clone();
        check::square_attacked(&mut scratch, square, color)
    }

    /// Applies a move and reports whether it took effect. A `false` return
    /// leaves the board exactly as it was.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        let Some(mover) = self.piece_at(from).copied() else {
            return false;
        };
        if self.rules_enforced {
            if mover.color == self.last_moved {
                return false;
            }
            if !self.legal_moves(from).contains(&to) {
                return false;
            }
        }

        let window_was_open = self.en_passant_active;

        // A pawn landing on an enemy marker captures the pawn standing one
        // rank behind the marker, not whatever sits on the marker square.
        let mut passant_victim: Option<Square> = None;
        if window_was_open && mover.kind == PieceKind::Pawn {
            if let Some(marker) = self.shadow_at(to) {
                if marker.color != mover.color {
                    let dy = if marker.color == Color::White { 1 } else { -1 };
                    passant_victim = to.offset(0, dy);
                }
            }
        }

        // Capture bookkeeping, popped again if the move rolls back. The
        // en-passant victim leaves the grid now so it cannot mask a
        // discovered attack during the safety probe.
        let capture_square = passant_victim.unwrap_or(to);
        let mut captured_color: Option<Color> = None;
        if let Some(victim) = self.piece_at(capture_square).copied() {
            match victim.color {
                Color::White => self.captured_white.push(victim),
                Color::Black => self.captured_black.push(victim),
            }
            captured_color = Some(victim.color);
            if passant_victim.is_some() {
                *self.cell(capture_square) = None;
            }
        }

        let shadow_backup = if window_was_open {
            let backup = self.shadow;
            self.shadow = EMPTY_GRID;
            Some(backup)
        } else {
            None
        };

        // Special-move side effects: a two-square king move drags its rook
        // over, a double pawn push leaves a marker on the skipped square.
        let mut rook_undo: Option<(Square, Square, Piece)> = None;
        let mut opened_marker: Option<Square> = None;
        if mover.kind == PieceKind::King && (from.x as i8 - to.x as i8).abs() == 2 {
            let (rook_from_x, rook_to_x) = if from.x > to.x {
                (0, to.x + 1)
            } else {
                (7, to.x - 1)
            };
            let rook_from = Square::at(rook_from_x, to.y);
            let rook_to = Square::at(rook_to_x, to.y);
            if let Some(original) = self.cell(rook_from).take() {
                let mut rook = original;
                rook.position = rook_to;
                rook.has_moved = true;
                *self.cell(rook_to) = Some(rook);
                rook_undo = Some((rook_from, rook_to, original));
            }
        } else if mover.kind == PieceKind::Pawn && (from.y as i8 - to.y as i8).abs() > 1 {
            let skipped = Square::at(from.x, (from.y + to.y) / 2);
            let mut marker = mover;
            marker.position = skipped;
            marker.has_moved = true;
            *self.shadow_cell(skipped) = Some(marker);
            self.en_passant_active = true;
            opened_marker = Some(skipped);
        }

        // Perform the move; position and movement flag commit only after
        // the king safety test passes.
        let moved = self.cell(from).take();
        *self.cell(to) = moved;

        let exposes_king = match self.find_king(mover.color) {
            Some(king_sq) => check::square_attacked(self, king_sq, mover.color),
            None => false,
        };

        if exposes_king {
            let moved_back = self.cell(to).take();
            *self.cell(from) = moved_back;
            if let Some((rook_from, rook_to, original)) = rook_undo {
                *self.cell(rook_to) = None;
                *self.cell(rook_from) = Some(original);
            }
            if let Some(color) = captured_color {
                let victim = match color {
                    Color::White => self.captured_white.pop(),
                    Color::Black => self.captured_black.pop(),
                };
                *self.cell(capture_square) = victim;
            }
            if let Some(backup) = shadow_backup {
                self.shadow = backup;
                self.en_passant_active = true;
            } else if let Some(skipped) = opened_marker {
                *self.shadow_cell(skipped) = None;
                self.en_passant_active = false;
            }
            return false;
        }

        if let Some(piece) = self.cell(to).as_mut() {
            piece.position = to;
            piece.has_moved = true;
        }

        // A window that was open before this move closes now unless the
        // move opened a fresh one.
        if window_was_open && opened_marker.is_none() {
            self.en_passant_active = false;
        }

        self.last_moved = mover.color;
        true
    }

    /// Replaces a pawn standing on its back rank with a queen in place,
    /// keeping the pawn's id. Returns whether a promotion happened.
    pub fn promote_pawn(&mut self, at: Square) -> bool {
        let Some(piece) = self.piece_at(at).copied() else {
            return false;
        };
        if piece.kind != PieceKind::Pawn {
            return false;
        }
        let back_rank = match piece.color {
            Color::White => 7,
            Color::Black => 0,
        };
        if at.y != back_rank {
            return false;
        }
        *self.cell(at) = Some(Piece {
            kind: PieceKind::Queen,
            has_moved: true,
            ..piece
        });
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.grid = snapshot.grid;
        self.shadow = snapshot.shadow;
        self.last_moved = snapshot.last_moved;
        self.captured_white = snapshot.captured_white.clone();
        self.captured_black = snapshot.captured_black.clone();
        self.rules_enforced = snapshot.rules_enforced;
        self.en_passant_active = snapshot.en_passant_active;
    }

    /// No piece of `color` has any legal move. Checkmate and stalemate are
    /// told apart by asking `is_check` on the king square.
    pub fn is_stalemate(&self, color: Color) -> bool {
        for y in 0..8u8 {
            for x in 0..8u8 {
                let square = Square::at(x, y);
                if let Some(piece) = self.piece_at(square) {
                    if piece.color == color && !self.legal_moves(square).is_empty() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Whether `color` retains enough material to force mate. Pawns only
    /// count while they can still move.
    pub fn has_sufficient_material(&self, color: Color) -> bool {
        let mut total = 0.0f32;
        for y in 0..8u8 {
            for x in 0..8u8 {
                let square = Square::at(x, y);
                let Some(piece) = self.piece_at(square) else {
                    continue;
                };
                if piece.color != color {
                    continue;
                }
                total += match piece.kind {
                    PieceKind::King => 0.0,
                    PieceKind::Pawn => {
                        if self.legal_moves(square).is_empty() {
                            0.0
                        } else {
                            0.34
                        }
                    }
                    PieceKind::Bishop | PieceKind::Knight => 0.5,
                    PieceKind::Rook | PieceKind::Queen => 1.0,
                };
                if total >= 1.0 {
                    return true;
                }
            }
        }
        total >= 1.0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

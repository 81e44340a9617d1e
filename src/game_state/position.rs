//! Immutable bitboard position.
//!
//! `Position` stores one occupancy mask per (color, piece kind) pair plus a
//! has-moved mask. It is `Copy`: deriving a successor never touches the
//! original, so search threads can fork positions without synchronization.

use crate::game_state::chess_rules::{castling_rook_squares, KING_START};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{ChessMove, MoveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    // [color][piece_kind]
    pieces: [[Bitboard; 6]; 2],
    // Squares a piece has left or entered since the initial layout.
    moved: Bitboard,
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Position {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            moved: 0,
        }
    }

    /// Standard initial layout, nothing moved.
    pub const fn start() -> Self {
        let mut pieces = [[0u64; 6]; 2];
        pieces[0][PieceKind::Pawn.index()] = 0x0000_0000_0000_FF00;
        pieces[0][PieceKind::Knight.index()] = 0x0000_0000_0000_0042;
        pieces[0][PieceKind::Bishop.index()] = 0x0000_0000_0000_0024;
        pieces[0][PieceKind::Rook.index()] = 0x0000_0000_0000_0081;
        pieces[0][PieceKind::Queen.index()] = 0x0000_0000_0000_0008;
        pieces[0][PieceKind::King.index()] = 0x0000_0000_0000_0010;

        let mut kind = 0;
        while kind < 6 {
            pieces[1][kind] = pieces[0][kind].swap_bytes();
            kind += 1;
        }

        Self { pieces, moved: 0 }
    }

    /// Builder: returns a copy with `kind` of `color` placed on `square`,
    /// replacing whatever stood there.
    #[must_use]
    pub fn with_piece(mut self, square: Square, color: Color, kind: PieceKind) -> Self {
        let mask = square_bit(square);
        for side in &mut self.pieces {
            for bb in side.iter_mut() {
                *bb &= !mask;
            }
        }
        self.pieces[color.index()][kind.index()] |= mask;
        self
    }

    /// Builder: returns a copy with `square` flagged as already moved.
    #[must_use]
    pub fn with_moved(mut self, square: Square) -> Self {
        self.moved |= square_bit(square);
        self
    }

    #[inline]
    pub const fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub const fn moved_mask(&self) -> Bitboard {
        self.moved
    }

    #[inline]
    pub const fn has_moved(&self, square: Square) -> bool {
        (self.moved & square_bit(square)) != 0
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb)
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy(Color::Light) | self.occupancy(Color::Dark)
    }

    /// Piece standing on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = square_bit(square);
        for (color_index, side) in self.pieces.iter().enumerate() {
            for kind in ALL_PIECE_KINDS {
                if side[kind.index()] & mask != 0 {
                    return Some((Color::from_index(color_index), kind));
                }
            }
        }
        None
    }

    #[inline]
    pub fn piece_of_color_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bit(square);
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    /// All pieces of one side as `(square, kind)` pairs, grouped by kind.
    pub fn pieces_of(&self, color: Color) -> Vec<(Square, PieceKind)> {
        let mut out = Vec::with_capacity(16);
        for kind in ALL_PIECE_KINDS {
            out.extend(squares_of(self.pieces(color, kind)).map(|sq| (sq, kind)));
        }
        out
    }

    /// True when no square is claimed by two piece masks.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0u64;
        for side in &self.pieces {
            for bb in side {
                if seen & bb != 0 {
                    return false;
                }
                seen |= bb;
            }
        }
        true
    }

    /// Successor position after `mv`.
    ///
    /// Only the bits the move touches are flipped, so for a move produced by
    /// the generator on this position the 12 masks stay disjoint.
    #[must_use]
    pub fn apply_move(&self, mv: ChessMove) -> Position {
        let mut next = *self;
        let side = mv.side();
        let enemy = side.opposite();
        let from_mask = square_bit(mv.from());
        let to_mask = square_bit(mv.to());
        let moved_piece = mv.moved_piece();

        next.pieces[side.index()][moved_piece.index()] ^= from_mask | to_mask;
        next.moved |= from_mask | to_mask;

        if let Some(captured) = mv.captured_piece() {
            let capture_mask = if mv.kind() == MoveKind::EnPassant {
                // The passed pawn sits beside the origin, on the destination file.
                square_bit(make_square(square_file(mv.to()), square_rank(mv.from())))
            } else {
                to_mask
            };
            next.pieces[enemy.index()][captured.index()] ^= capture_mask;
        }

        match mv.kind() {
            MoveKind::Castle => {
                let (rook_from, rook_to) = castling_rook_squares(mv.to());
                let rook_mask = square_bit(rook_from) | square_bit(rook_to);
                next.pieces[side.index()][PieceKind::Rook.index()] ^= rook_mask;
                next.moved |= rook_mask;
            }
            MoveKind::Promotion => {
                if let Some(promoted) = mv.promotion_piece() {
                    next.pieces[side.index()][moved_piece.index()] ^= to_mask;
                    next.pieces[side.index()][promoted.index()] ^= to_mask;
                }
            }
            MoveKind::Standard | MoveKind::EnPassant => {}
        }

        next
    }

    /// Applies a sequence of moves in order.
    #[must_use]
    pub fn apply_moves(&self, moves: &[ChessMove]) -> Position {
        moves.iter().fold(*self, |pos, mv| pos.apply_move(*mv))
    }

    /// True while the king of `color` still stands unmoved on its start square.
    #[inline]
    pub fn king_unmoved(&self, color: Color) -> bool {
        let start = KING_START[color.index()];
        self.pieces(color, PieceKind::King) & square_bit(start) != 0 && !self.has_moved(start)
    }
}

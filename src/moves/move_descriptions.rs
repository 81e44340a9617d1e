//! Packed move descriptions.
//!
//! A `ChessMove` is a single `u32` so moves compare and hash as integers.
//!
//! | bits  | field                          |
//! |-------|--------------------------------|
//! | 0-5   | origin square                  |
//! | 6-11  | destination square             |
//! | 12-14 | moving piece kind              |
//! | 15-17 | captured piece kind (7 = none) |
//! | 18-20 | promotion kind (7 = none)      |
//! | 21-22 | move kind                      |
//! | 23    | side (0 = light, 1 = dark)     |
//! | 24    | first move of the moving piece |

use std::fmt;

use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_PIECE_SHIFT: u32 = 12;
const CAPTURED_PIECE_SHIFT: u32 = 15;
const PROMOTION_PIECE_SHIFT: u32 = 18;
const KIND_SHIFT: u32 = 21;
const SIDE_SHIFT: u32 = 23;
const FIRST_MOVE_SHIFT: u32 = 24;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const KIND_MASK: u32 = 0x3;
const USED_BITS: u32 = (1 << 25) - 1;

pub const NO_PIECE_CODE: u32 = 0x7;

/// What a move does beyond relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Standard,
    Castle,
    EnPassant,
    Promotion,
}

impl MoveKind {
    #[inline]
    const fn code(self) -> u32 {
        match self {
            MoveKind::Standard => 0,
            MoveKind::Castle => 1,
            MoveKind::EnPassant => 2,
            MoveKind::Promotion => 3,
        }
    }

    #[inline]
    const fn from_code(code: u32) -> Self {
        match code & KIND_MASK {
            0 => MoveKind::Standard,
            1 => MoveKind::Castle,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Promotion,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove(u32);

impl ChessMove {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        side: Color,
        kind: MoveKind,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        from: Square,
        to: Square,
        first_move: bool,
    ) -> Self {
        let mut out = 0u32;
        out |= ((from as u32) & SQUARE_MASK) << FROM_SHIFT;
        out |= ((to as u32) & SQUARE_MASK) << TO_SHIFT;
        out |= (moved_piece.index() as u32) << MOVED_PIECE_SHIFT;
        out |= piece_code(captured_piece) << CAPTURED_PIECE_SHIFT;
        out |= piece_code(promotion_piece) << PROMOTION_PIECE_SHIFT;
        out |= kind.code() << KIND_SHIFT;
        out |= (side.index() as u32) << SIDE_SHIFT;
        if first_move {
            out |= 1 << FIRST_MOVE_SHIFT;
        }
        Self(out)
    }

    /// Rebuilds a move from its packed form, rejecting unknown piece codes.
    pub fn from_bits(bits: u32) -> MoveGenResult<Self> {
        if bits & !USED_BITS != 0 {
            return Err(MoveGenerationError::InvalidState(format!(
                "packed move {bits:#x} has bits beyond the move layout"
            )));
        }
        let moved = (bits >> MOVED_PIECE_SHIFT) & PIECE_MASK;
        if PieceKind::from_index(moved as usize).is_none() {
            return Err(MoveGenerationError::InvalidState(format!(
                "unknown moving piece code {moved}"
            )));
        }
        for (name, shift) in [
            ("captured", CAPTURED_PIECE_SHIFT),
            ("promotion", PROMOTION_PIECE_SHIFT),
        ] {
            let code = (bits >> shift) & PIECE_MASK;
            if code != NO_PIECE_CODE && PieceKind::from_index(code as usize).is_none() {
                return Err(MoveGenerationError::InvalidState(format!(
                    "unknown {name} piece code {code}"
                )));
            }
        }
        let kind = MoveKind::from_code(bits >> KIND_SHIFT);
        let promotion = PieceKind::from_index(((bits >> PROMOTION_PIECE_SHIFT) & PIECE_MASK) as usize);
        match (kind, promotion) {
            (MoveKind::Promotion, Some(piece)) if PROMOTION_KINDS.contains(&piece) => {}
            (MoveKind::Promotion, other) => {
                return Err(MoveGenerationError::InvalidState(format!(
                    "promotion move {bits:#x} promotes to {other:?}"
                )));
            }
            (_, Some(piece)) => {
                return Err(MoveGenerationError::InvalidState(format!(
                    "{kind:?} move {bits:#x} carries promotion piece {piece:?}"
                )));
            }
            (_, None) => {}
        }
        Ok(Self(bits))
    }

    /// Re-derives the full move description from the board it is played on.
    ///
    /// The kind is inferred the same way the generator assigns it: a pawn
    /// reaching the back rank promotes, a king moving two files castles, and a
    /// pawn moving diagonally onto an empty square captures en passant.
    pub fn derive(
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveGenResult<Self> {
        let (side, moved_piece) = position.piece_at(from).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("no piece on origin square {from}"))
        })?;

        let to_mask = square_bit(to);
        let file_delta = square_file(from).abs_diff(square_file(to));
        let reaches_back_rank = (promotion_rank(side) & to_mask) != 0;

        let kind = if moved_piece == PieceKind::Pawn && reaches_back_rank {
            match promotion {
                Some(PieceKind::Pawn) | Some(PieceKind::King) | None => {
                    return Err(MoveGenerationError::InvalidState(format!(
                        "pawn reaching square {to} needs a queen, rook, bishop or knight promotion"
                    )));
                }
                Some(_) => MoveKind::Promotion,
            }
        } else if moved_piece == PieceKind::King && file_delta == 2 {
            MoveKind::Castle
        } else if moved_piece == PieceKind::Pawn
            && file_delta == 1
            && (position.occupancy_all() & to_mask) == 0
        {
            MoveKind::EnPassant
        } else {
            MoveKind::Standard
        };

        let captured_piece = match kind {
            MoveKind::EnPassant => Some(PieceKind::Pawn),
            _ => position.piece_of_color_at(side.opposite(), to),
        };
        let promotion_piece = match kind {
            MoveKind::Promotion => promotion,
            _ => None,
        };

        Ok(Self::new(
            side,
            kind,
            moved_piece,
            captured_piece,
            promotion_piece,
            from,
            to,
            !position.has_moved(from),
        ))
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn side(self) -> Color {
        Color::from_index(((self.0 >> SIDE_SHIFT) & 1) as usize)
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_code(self.0 >> KIND_SHIFT)
    }

    #[inline]
    pub fn moved_piece(self) -> PieceKind {
        match PieceKind::from_index(((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK) as usize) {
            Some(piece) => piece,
            None => unreachable!("moving piece codes are validated on construction"),
        }
    }

    #[inline]
    pub fn captured_piece(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub fn promotion_piece(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub const fn is_first_move(self) -> bool {
        (self.0 >> FIRST_MOVE_SHIFT) & 1 != 0
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        ((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK) != NO_PIECE_CODE
    }

    /// A pawn advancing two ranks in one move, the trigger for en passant.
    #[inline]
    pub fn is_double_pawn_push(self) -> bool {
        self.moved_piece() == PieceKind::Pawn
            && self.kind() == MoveKind::Standard
            && self.from().abs_diff(self.to()) == 16
    }
}

#[inline]
const fn piece_code(piece: Option<PieceKind>) -> u32 {
    match piece {
        Some(piece) => piece.index() as u32,
        None => NO_PIECE_CODE,
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessMove")
            .field("side", &self.side())
            .field("kind", &self.kind())
            .field("piece", &self.moved_piece())
            .field("from", &self.from())
            .field("to", &self.to())
            .field("captured", &self.captured_piece())
            .field("promotion", &self.promotion_piece())
            .finish()
    }
}

//! Bishop attack bitboards.
//!
//! Same shift-slide kernel as the rook, along the four diagonals.

use crate::game_state::chess_types::Bitboard;
use crate::moves::ray_shifts::{slide_targets, DIAGONAL};

#[inline]
pub fn bishop_targets(bishops: Bitboard, own: Bitboard, enemy: Bitboard) -> Bitboard {
    slide_targets(bishops, own, enemy, &DIAGONAL)
}

#[inline]
pub fn bishop_attacks(bishops: Bitboard, occupancy: Bitboard) -> Bitboard {
    slide_targets(bishops, 0, occupancy, &DIAGONAL)
}

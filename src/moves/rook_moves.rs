//! Rook attack bitboards.
//!
//! Computed for a whole rook mask at once by sliding along the four
//! orthogonal rays with bit shifts.

use crate::game_state::chess_types::Bitboard;
use crate::moves::ray_shifts::{slide_targets, ORTHOGONAL};

/// Quiet moves and captures of every rook in `rooks`.
#[inline]
pub fn rook_targets(rooks: Bitboard, own: Bitboard, enemy: Bitboard) -> Bitboard {
    slide_targets(rooks, own, enemy, &ORTHOGONAL)
}

/// Squares attacked by `rooks`; the first occupied square on each ray counts.
#[inline]
pub fn rook_attacks(rooks: Bitboard, occupancy: Bitboard) -> Bitboard {
    slide_targets(rooks, 0, occupancy, &ORTHOGONAL)
}

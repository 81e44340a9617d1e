//! Queen attack bitboards.
//!
//! Slides along all eight directions, i.e. the rook and bishop rays combined.

use crate::game_state::chess_types::Bitboard;
use crate::moves::ray_shifts::{slide_targets, ALL_DIRECTIONS};

#[inline]
pub fn queen_targets(queens: Bitboard, own: Bitboard, enemy: Bitboard) -> Bitboard {
    slide_targets(queens, own, enemy, &ALL_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(queens: Bitboard, occupancy: Bitboard) -> Bitboard {
    slide_targets(queens, 0, occupancy, &ALL_DIRECTIONS)
}

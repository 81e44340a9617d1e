//! Knight attack bitboards, one jump per offset over the whole knight mask.

use crate::game_state::chess_types::Bitboard;
use crate::moves::ray_shifts::{step_union, KNIGHT_JUMPS};

#[inline]
pub fn knight_targets(knights: Bitboard, own: Bitboard) -> Bitboard {
    knight_attacks(knights) & !own
}

#[inline]
pub fn knight_attacks(knights: Bitboard) -> Bitboard {
    step_union(knights, &KNIGHT_JUMPS)
}

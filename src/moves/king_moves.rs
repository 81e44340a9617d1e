//! King attack bitboards.
//!
//! One step in each of the eight directions; castling is handled by the
//! legal move generator because it needs the opponent's attack map.

use crate::game_state::chess_types::Bitboard;
use crate::moves::ray_shifts::{step_union, ALL_DIRECTIONS};

#[inline]
pub fn king_targets(kings: Bitboard, own: Bitboard) -> Bitboard {
    king_attacks(kings) & !own
}

#[inline]
pub fn king_attacks(kings: Bitboard) -> Bitboard {
    step_union(kings, &ALL_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, king_targets};

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(1).count_ones(), 3);
    }

    #[test]
    fn centred_king_has_eight_targets() {
        let e4 = 1u64 << 28;
        assert_eq!(king_targets(e4, e4).count_ones(), 8);
    }

    #[test]
    fn friendly_squares_are_removed() {
        let e1 = 1u64 << 4;
        let own = e1 | (1u64 << 12) | (1u64 << 3);
        assert_eq!(king_targets(e1, own).count_ones(), 3);
    }
}

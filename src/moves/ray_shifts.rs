//! Bit-shift steps shared by every attack kernel.
//!
//! A `Step` moves every bit of a mask one offset across the board at once and
//! drops bits that would wrap around the a/h files. Bits leaving past rank 1
//! or rank 8 fall off the end of the `u64` on their own.

use crate::game_state::chess_rules::{FILE_A, FILE_B, FILE_G, FILE_H};
use crate::game_state::chess_types::Bitboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    shift: i8,
    // Destination squares that are reachable without wrapping.
    landing: Bitboard,
}

impl Step {
    pub const fn new(shift: i8, landing: Bitboard) -> Self {
        Self { shift, landing }
    }

    #[inline]
    pub const fn apply(self, bitboard: Bitboard) -> Bitboard {
        let moved = if self.shift >= 0 {
            bitboard << (self.shift as u32)
        } else {
            bitboard >> ((-self.shift) as u32)
        };
        moved & self.landing
    }
}

pub const NORTH: Step = Step::new(8, !0);
pub const SOUTH: Step = Step::new(-8, !0);
pub const EAST: Step = Step::new(1, !FILE_A);
pub const WEST: Step = Step::new(-1, !FILE_H);
pub const NORTH_EAST: Step = Step::new(9, !FILE_A);
pub const NORTH_WEST: Step = Step::new(7, !FILE_H);
pub const SOUTH_EAST: Step = Step::new(-7, !FILE_A);
pub const SOUTH_WEST: Step = Step::new(-9, !FILE_H);

pub const ORTHOGONAL: [Step; 4] = [NORTH, SOUTH, EAST, WEST];
pub const DIAGONAL: [Step; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];
pub const ALL_DIRECTIONS: [Step; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];

pub const KNIGHT_JUMPS: [Step; 8] = [
    Step::new(17, !FILE_A),
    Step::new(15, !FILE_H),
    Step::new(10, !(FILE_A | FILE_B)),
    Step::new(6, !(FILE_G | FILE_H)),
    Step::new(-6, !(FILE_A | FILE_B)),
    Step::new(-10, !(FILE_G | FILE_H)),
    Step::new(-15, !FILE_A),
    Step::new(-17, !FILE_H),
];

/// Union of one step in each direction.
#[inline]
pub fn step_union(bitboard: Bitboard, steps: &[Step]) -> Bitboard {
    steps.iter().fold(0u64, |acc, step| acc | step.apply(bitboard))
}

/// Destinations of every slider in `sliders` along `rays`.
///
/// Each ray front advances one square per iteration, at most 7 times.
/// Squares holding `own` pieces are removed before they count; squares
/// holding `enemy` pieces count as captures and then stop that front.
pub fn slide_targets(sliders: Bitboard, own: Bitboard, enemy: Bitboard, rays: &[Step]) -> Bitboard {
    let mut targets = 0u64;
    for ray in rays {
        let mut front = sliders;
        for _ in 0..7 {
            front = ray.apply(front) & !own;
            if front == 0 {
                break;
            }
            targets |= front;
            front &= !enemy;
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_step_does_not_wrap_from_h_file() {
        let h4 = 1u64 << 31;
        assert_eq!(EAST.apply(h4), 0);
        assert_eq!(WEST.apply(h4), 1u64 << 30);
    }

    #[test]
    fn knight_jumps_from_a1_reach_two_squares() {
        assert_eq!(step_union(1, &KNIGHT_JUMPS), (1u64 << 10) | (1u64 << 17));
    }

    #[test]
    fn slide_stops_before_own_piece_and_on_enemy_piece() {
        let a1 = 1u64;
        let own_a4 = 1u64 << 24;
        let enemy_c1 = 1u64 << 2;
        let targets = slide_targets(a1, own_a4, enemy_c1, &ORTHOGONAL);

        // a2, a3 up; b1, c1 right
        assert_eq!(targets, (1u64 << 8) | (1u64 << 16) | (1u64 << 1) | (1u64 << 2));
    }
}

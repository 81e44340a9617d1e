//! Canonical chess-rule constants.
//!
//! Rank/file masks used by the shift kernels to stop wrap-around, plus the
//! fixed squares involved in the starting layout and castling.

use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const LIGHT_SQUARES: Bitboard = 0x55AA_55AA_55AA_55AA;
pub const DARK_SQUARES: Bitboard = !LIGHT_SQUARES;

pub const KING_START: [Square; 2] = [4, 60];
pub const KINGSIDE_ROOK_START: [Square; 2] = [7, 63];
pub const QUEENSIDE_ROOK_START: [Square; 2] = [0, 56];

#[inline]
pub const fn pawn_start_rank(color: Color) -> Bitboard {
    match color {
        Color::Light => RANK_2,
        Color::Dark => RANK_7,
    }
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::Light => RANK_8,
        Color::Dark => RANK_1,
    }
}

/// Square one step forward for a pawn of `color`.
#[inline]
pub const fn pawn_step(color: Color, square: Square) -> Square {
    match color {
        Color::Light => square + 8,
        Color::Dark => square - 8,
    }
}

/// Rook origin and destination for a castling king landing on `king_to`.
#[inline]
pub const fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let rank_base = king_to - king_to % 8;
    if king_to % 8 == 6 {
        (rank_base + 7, rank_base + 5)
    } else {
        (rank_base, rank_base + 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_colour_masks_partition_board() {
        assert_eq!(LIGHT_SQUARES & DARK_SQUARES, 0);
        assert_eq!(LIGHT_SQUARES.count_ones(), 32);
        // a1 is a dark square
        assert_ne!(DARK_SQUARES & 1, 0);
    }

    #[test]
    fn castling_rook_squares_cover_all_four_castles() {
        assert_eq!(castling_rook_squares(6), (7, 5));
        assert_eq!(castling_rook_squares(2), (0, 3));
        assert_eq!(castling_rook_squares(62), (63, 61));
        assert_eq!(castling_rook_squares(58), (56, 59));
    }
}

//! Pawn push and capture bitboards.
//!
//! Pushes depend on empty squares and the has-moved mask, captures on enemy
//! occupancy. En passant needs the previous move and lives in the generator.

use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::chess_types::{Bitboard, Color};
use crate::moves::ray_shifts::{Step, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST};

#[inline]
const fn forward(color: Color) -> Step {
    match color {
        Color::Light => NORTH,
        Color::Dark => SOUTH,
    }
}

/// Diagonal squares attacked by `pawns`, whether occupied or not.
#[inline]
pub const fn pawn_attacks(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::Light => NORTH_EAST.apply(pawns) | NORTH_WEST.apply(pawns),
        Color::Dark => SOUTH_EAST.apply(pawns) | SOUTH_WEST.apply(pawns),
    }
}

/// Single and double pushes onto empty squares.
///
/// A double push needs the pawn unmoved on its start rank and both squares
/// in front of it empty.
#[inline]
pub fn pawn_pushes(color: Color, pawns: Bitboard, empty: Bitboard, moved: Bitboard) -> Bitboard {
    let step = forward(color);
    let single = step.apply(pawns) & empty;
    let eligible = pawns & pawn_start_rank(color) & !moved;
    let double = step.apply(step.apply(eligible) & empty) & empty;
    single | double
}

#[inline]
pub fn pawn_captures(color: Color, pawns: Bitboard, enemy: Bitboard) -> Bitboard {
    pawn_attacks(color, pawns) & enemy
}

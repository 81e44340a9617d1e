//! Core value types shared by the board, move generation and search.
//!
//! Everything here is `Copy` and fits in a register so positions and moves
//! can be forked freely during search.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        if index == 0 {
            Color::Light
        } else {
            Color::Dark
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Kinds a pawn may promote to, strongest first.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Board square index (`0..=63`, `rank * 8 + file`).
pub type Square = u8;

/// One bit per square.
pub type Bitboard = u64;

#[inline]
pub const fn square_bit(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Iterates the set squares of a bitboard from a1 upwards.
#[derive(Debug, Clone, Copy)]
pub struct SquareIter(Bitboard);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }
}

#[inline]
pub const fn squares_of(bitboard: Bitboard) -> SquareIter {
    SquareIter(bitboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_opposite_round_trips() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Dark.opposite().opposite(), Color::Dark);
        assert_eq!(Color::from_index(Color::Dark.index()), Color::Dark);
    }

    #[test]
    fn piece_kind_index_table_is_dense() {
        for (i, kind) in ALL_PIECE_KINDS.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(6), None);
    }

    #[test]
    fn square_iter_visits_bits_in_order() {
        let squares: Vec<Square> = squares_of(square_bit(3) | square_bit(17) | square_bit(63)).collect();
        assert_eq!(squares, vec![3, 17, 63]);
        assert_eq!(make_square(square_file(45), square_rank(45)), 45);
    }
}

//! Pluggable board evaluation.
//!
//! Search only talks to `BoardScorer`, so alternative heuristics can be swapped
//! in without touching the search code. Scores are relative: positive favours
//! the side being evaluated.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::piece_mobility;

pub trait BoardScorer: Send + Sync {
    /// Score of `position` from the point of view of `side`.
    fn score(&self, position: &Position, side: Color) -> f64;
}

/// Shannon piece values.
#[inline]
pub const fn piece_value(piece: PieceKind) -> f64 {
    match piece {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 200.0,
    }
}

fn material(position: &Position, color: Color) -> f64 {
    ALL_PIECE_KINDS
        .iter()
        .map(|&kind| f64::from(position.pieces(color, kind).count_ones()) * piece_value(kind))
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position, side: Color) -> f64 {
        material(position, side) - material(position, side.opposite())
    }
}

/// Bonus weights for `HeuristicScorer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Per pseudo-legal move of a knight or bishop that has left its square.
    pub minor_mobility: f64,
    /// Per rank a pawn has advanced beyond its third rank.
    pub pawn_advance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            minor_mobility: 0.02,
            pawn_advance: 0.04,
        }
    }
}

/// Material plus small development bonuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    pub weights: ScoringWeights,
}

impl HeuristicScorer {
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn side_score(&self, position: &Position, color: Color) -> f64 {
        let mut score = material(position, color);

        for kind in [PieceKind::Knight, PieceKind::Bishop] {
            for square in squares_of(position.pieces(color, kind) & position.moved_mask()) {
                score += self.weights.minor_mobility * f64::from(piece_mobility(position, color, square));
            }
        }

        for square in squares_of(position.pieces(color, PieceKind::Pawn)) {
            let rank = i32::from(square_rank(square));
            let advance = match color {
                Color::Light => rank - 2,
                Color::Dark => 5 - rank,
            };
            if advance > 0 {
                score += self.weights.pawn_advance * f64::from(advance);
            }
        }

        score
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, position: &Position, side: Color) -> f64 {
        self.side_score(position, side) - self.side_score(position, side.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn start_position_is_balanced() {
        let pos = Position::start();
        assert_eq!(MaterialScorer.score(&pos, Color::Light), 0.0);
        assert!(HeuristicScorer::default().score(&pos, Color::Dark).abs() < EPS);
    }

    #[test]
    fn material_is_antisymmetric() {
        let pos = Position::start().with_piece(59, Color::Light, PieceKind::Pawn);
        let light = MaterialScorer.score(&pos, Color::Light);
        assert!((light - 10.0).abs() < EPS);
        assert!((MaterialScorer.score(&pos, Color::Dark) + light).abs() < EPS);
    }

    #[test]
    fn advanced_pawn_earns_bonus() {
        // light pawn on e5 is two ranks past its third rank
        let pos = Position::empty().with_piece(36, Color::Light, PieceKind::Pawn);
        let score = HeuristicScorer::default().score(&pos, Color::Light);
        assert!((score - (1.0 + 2.0 * 0.04)).abs() < EPS);

        // dark pawn on e4 mirrors it
        let dark = Position::empty().with_piece(28, Color::Dark, PieceKind::Pawn);
        let score = HeuristicScorer::default().score(&dark, Color::Dark);
        assert!((score - (1.0 + 2.0 * 0.04)).abs() < EPS);
    }

    #[test]
    fn moved_knight_earns_mobility_bonus() {
        let pos = Position::start();
        let developed = pos.apply_move(
            crate::moves::move_descriptions::ChessMove::derive(&pos, 6, 21, None).expect("g1 knight"),
        );
        // Nf3 reaches g1, e5, g5, d4, h4
        let expected = 5.0 * 0.02;
        let score = HeuristicScorer::default().score(&developed, Color::Light);
        assert!((score - expected).abs() < EPS, "got {score}");
    }

    #[test]
    fn weights_are_swappable() {
        let pos = Position::empty().with_piece(36, Color::Light, PieceKind::Pawn);
        let flat = HeuristicScorer::new(ScoringWeights {
            minor_mobility: 0.0,
            pawn_advance: 0.0,
        });
        assert_eq!(flat.score(&pos, Color::Light), 1.0);
    }
}

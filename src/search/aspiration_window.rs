//! Root candidate pruning between iterative-deepening passes.
//!
//! After each pass the scored root moves are filtered to those scoring at
//! least `mean - k * stddev`. Forced wins and forced losses are handled before
//! the statistics, since their sentinel scores would swamp the mean.

use crate::moves::move_descriptions::ChessMove;

/// Score reported for a forced win.
pub const WIN_SCORE: f64 = f64::MAX;
/// Score reported for a forced loss.
pub const LOSS_SCORE: f64 = f64::MIN;

// Bound on threshold doublings; the band contains the maximum long before.
const MAX_WIDENINGS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub chess_move: ChessMove,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    pub initial_factor: f64,
    pub growth: f64,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            initial_factor: 0.2,
            growth: 2.0,
        }
    }
}

/// Population mean and standard deviation.
pub fn mean_and_stddev(scores: &[f64]) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.0);
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Highest score in `scored`, or `LOSS_SCORE` when empty.
pub fn max_score(scored: &[ScoredMove]) -> f64 {
    scored.iter().map(|s| s.score).fold(LOSS_SCORE, f64::max)
}

/// Moves worth re-searching at the next depth.
///
/// The maximal moves are always part of the result.
pub fn select_window(scored: &[ScoredMove], params: WindowParams) -> Vec<ScoredMove> {
    let mut window = statistical_band(scored, params);
    let best = max_score(scored);
    for candidate in scored.iter().filter(|s| s.score == best) {
        if !window.iter().any(|w| w.chess_move == candidate.chess_move) {
            window.push(*candidate);
        }
    }
    window
}

fn statistical_band(scored: &[ScoredMove], params: WindowParams) -> Vec<ScoredMove> {
    if let Some(winner) = scored.iter().find(|s| s.score == WIN_SCORE) {
        return vec![*winner];
    }

    let contenders: Vec<ScoredMove> = scored.iter().copied().filter(|s| s.score > LOSS_SCORE).collect();
    if contenders.is_empty() {
        // Every move loses; keep one.
        return scored.first().copied().into_iter().collect();
    }

    let scores: Vec<f64> = contenders.iter().map(|s| s.score).collect();
    let (mean, stddev) = mean_and_stddev(&scores);

    let mut factor = params.initial_factor;
    for _ in 0..MAX_WIDENINGS {
        let threshold = mean - stddev * factor;
        let band: Vec<ScoredMove> = contenders.iter().copied().filter(|s| s.score >= threshold).collect();
        if !band.is_empty() {
            return band;
        }
        factor *= params.growth;
    }
    contenders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::MoveKind;

    fn scored(to: u8, score: f64) -> ScoredMove {
        ScoredMove {
            chess_move: ChessMove::new(Color::Light, MoveKind::Standard, PieceKind::Queen, None, None, 3, to, false),
            score,
        }
    }

    #[test]
    fn statistics_of_simple_sample() {
        let (mean, stddev) = mean_and_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((stddev - 2.0).abs() < 1e-12);
        assert_eq!(mean_and_stddev(&[]), (0.0, 0.0));
    }

    #[test]
    fn weak_moves_fall_out_of_window() {
        let moves = [scored(10, 1.0), scored(11, 1.0), scored(12, -5.0), scored(13, 0.9)];
        let window = select_window(&moves, WindowParams::default());
        let targets: Vec<u8> = window.iter().map(|s| s.chess_move.to()).collect();
        assert_eq!(targets, vec![10, 11, 13]);
    }

    #[test]
    fn forced_win_collapses_window() {
        let moves = [scored(10, 1.0), scored(11, WIN_SCORE), scored(12, WIN_SCORE)];
        let window = select_window(&moves, WindowParams::default());
        assert_eq!(window.len(), 2);
        assert!(window.iter().all(|s| s.score == WIN_SCORE));

        let band = statistical_band(&moves, WindowParams::default());
        assert_eq!(band.len(), 1);
        assert_eq!(band[0].chess_move.to(), 11);
    }

    #[test]
    fn losing_moves_are_excluded_unless_all_lose() {
        let mixed = [scored(10, LOSS_SCORE), scored(11, 0.5), scored(12, 0.5)];
        let window = select_window(&mixed, WindowParams::default());
        assert!(window.iter().all(|s| s.score > LOSS_SCORE));
        assert_eq!(window.len(), 2);

        let lost = [scored(10, LOSS_SCORE), scored(11, LOSS_SCORE)];
        let window = select_window(&lost, WindowParams::default());
        assert_eq!(window.len(), 2);
        assert_eq!(statistical_band(&lost, WindowParams::default()).len(), 1);
    }

    #[test]
    fn window_is_never_empty() {
        let moves = [scored(10, 3.0), scored(11, -1.0e6)];
        let tight = WindowParams {
            initial_factor: 0.0,
            growth: 2.0,
        };
        let window = select_window(&moves, tight);
        assert!(!window.is_empty());
        assert!(window.iter().any(|s| s.chess_move.to() == 10));
    }
}

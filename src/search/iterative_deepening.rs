//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! The root driver rates every candidate move at increasing depth and narrows
//! the candidate set between passes with an aspiration window. Ties at the end
//! are broken by the caller's random generator, so a fixed seed gives a
//! reproducible choice.

use log::{debug, trace, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::game_state::game_status::{game_status, side_to_move, GameStatus};
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::ChessMove;
use crate::search::aspiration_window::{
    max_score, select_window, ScoredMove, WindowParams, LOSS_SCORE, WIN_SCORE,
};
use crate::search::board_scoring::BoardScorer;
use crate::search::threading::{parallel_map, SharedSearchState};

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Color),
    #[error("{0:?} is not a legal move here")]
    IllegalMove(ChessMove),
    #[error("game is already over: {0:?}")]
    GameOver(GameStatus),
    #[error("search aborted after {nodes} nodes, evaluation incomplete")]
    Aborted { nodes: u64 },
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Upper bound applied to any requested depth.
    pub max_depth: u8,
    pub initial_window_factor: f64,
    pub window_growth: f64,
    pub depth_step: u8,
    pub threads: usize,
    pub node_budget: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            initial_window_factor: 0.2,
            window_growth: 2.0,
            depth_step: 2,
            threads: 1,
            node_budget: None,
        }
    }
}

impl SearchConfig {
    #[inline]
    fn window_params(&self) -> WindowParams {
        WindowParams {
            initial_factor: self.initial_window_factor,
            growth: self.window_growth,
        }
    }

    /// Depth following `current` when searching to `target`: step up, clamp to
    /// the target, then step past it once the full-depth pass is done.
    #[inline]
    pub fn next_depth(&self, current: u8, target: u8) -> u8 {
        if current >= target {
            target.saturating_add(1)
        } else {
            current.saturating_add(self.depth_step.max(1)).min(target)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub best_move: ChessMove,
    pub best_score: f64,
    pub reached_depth: u8,
    pub window_size: usize,
    pub nodes: u64,
}

pub struct SearchEngine<G, S> {
    generator: G,
    scorer: S,
    config: SearchConfig,
}

impl<G: MoveGenerator, S: BoardScorer> SearchEngine<G, S> {
    pub fn new(generator: G, scorer: S, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
        }
    }

    /// Picks a move for the side to move after `preceding`.
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        position: &Position,
        preceding: Option<ChessMove>,
        depth: u8,
        rng: &mut R,
    ) -> SearchResult<ChessMove> {
        self.select_move_with_report(position, preceding, depth, rng)
            .map(|report| report.best_move)
    }

    pub fn select_move_with_report<R: Rng + ?Sized>(
        &self,
        position: &Position,
        preceding: Option<ChessMove>,
        depth: u8,
        rng: &mut R,
    ) -> SearchResult<SearchReport> {
        if preceding.is_some() {
            let status = game_status(position, preceding);
            if status.is_game_over() {
                return Err(SearchError::GameOver(status));
            }
        }

        let mover = side_to_move(preceding);
        let mut root: Vec<ChessMove> = self
            .generator
            .generate_moves(position, mover, preceding)?
            .into_iter()
            .map(|generated| generated.chess_move)
            .collect();
        if root.is_empty() {
            return Err(SearchError::NoLegalMoves(mover));
        }
        root.shuffle(rng);

        let depth = self.capped_depth(depth);
        let state = SharedSearchState::new(self.config.node_budget);
        let mut window: Vec<ScoredMove> = root
            .into_iter()
            .map(|chess_move| ScoredMove {
                chess_move,
                score: 0.0,
            })
            .collect();
        let mut scored: Vec<ScoredMove>;
        let mut best: f64;
        let mut reached_depth: u8;
        let mut sim_depth = 0u8;

        loop {
            scored = self.rate_window(position, &window, sim_depth, &state)?;
            best = max_score(&scored);
            window = select_window(&scored, self.config.window_params());
            reached_depth = sim_depth;

            debug!(
                "depth {sim_depth}: rated {} moves, best score {best}, window {}",
                scored.len(),
                window.len()
            );
            trace!("window: {window:?}");

            sim_depth = self.config.next_depth(sim_depth, depth);
            if sim_depth > depth || window.len() <= 1 || best >= WIN_SCORE {
                break;
            }
        }

        let best_move = if let [only] = window.as_slice() {
            only.chess_move
        } else {
            let maximal: Vec<ChessMove> = scored
                .iter()
                .filter(|s| s.score == best)
                .map(|s| s.chess_move)
                .collect();
            match maximal.choose(rng) {
                Some(mv) => *mv,
                None => return Err(SearchError::NoLegalMoves(mover)),
            }
        };

        Ok(SearchReport {
            best_move,
            best_score: best,
            reached_depth,
            window_size: window.len(),
            nodes: state.nodes(),
        })
    }

    /// Score of `chess_move` for the side playing it, searched `depth` plies.
    ///
    /// Fails before searching when the mover has no legal moves or
    /// `chess_move` is not one of them.
    pub fn rate_move(&self, position: &Position, chess_move: ChessMove, depth: u8) -> SearchResult<f64> {
        self.rate_move_after(position, None, chess_move, depth)
    }

    /// Like [`Self::rate_move`], with the move that led to `position` so en
    /// passant replies can be rated.
    pub fn rate_move_after(
        &self,
        position: &Position,
        preceding: Option<ChessMove>,
        chess_move: ChessMove,
        depth: u8,
    ) -> SearchResult<f64> {
        let side = chess_move.side();
        let legal = self.generator.generate_moves(position, side, preceding)?;
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves(side));
        }
        if !legal.iter().any(|generated| generated.chess_move == chess_move) {
            return Err(SearchError::IllegalMove(chess_move));
        }

        let state = SharedSearchState::new(self.config.node_budget);
        self.rate_move_shared(position, chess_move, self.capped_depth(depth), &state)
    }

    fn capped_depth(&self, depth: u8) -> u8 {
        let max_depth = self.config.max_depth;
        if depth > max_depth {
            debug!("requested depth {depth} capped to {max_depth}");
            max_depth
        } else {
            depth
        }
    }

    fn rate_move_shared(
        &self,
        position: &Position,
        chess_move: ChessMove,
        depth: u8,
        state: &SharedSearchState,
    ) -> SearchResult<f64> {
        let next = position.apply_move(chess_move);
        let score = self.negamax(&next, Some(chess_move), depth.saturating_sub(1), LOSS_SCORE, WIN_SCORE, state)?;
        Ok(-score)
    }

    fn rate_window(
        &self,
        position: &Position,
        window: &[ScoredMove],
        depth: u8,
        state: &SharedSearchState,
    ) -> SearchResult<Vec<ScoredMove>> {
        let rated = parallel_map(window, self.config.threads, |candidate| {
            self.rate_move_shared(position, candidate.chess_move, depth, state)
                .map(|score| ScoredMove {
                    chess_move: candidate.chess_move,
                    score,
                })
        });
        rated.into_iter().collect()
    }

    /// Best score reachable for the side to move, bounded by `alpha`/`beta`.
    ///
    /// A node without moves returns `alpha` unchanged.
    fn negamax(
        &self,
        position: &Position,
        last_move: Option<ChessMove>,
        depth: u8,
        alpha: f64,
        beta: f64,
        state: &SharedSearchState,
    ) -> SearchResult<f64> {
        if state.bump_nodes_and_check_budget(1) {
            let nodes = state.nodes();
            warn!("node budget exhausted after {nodes} nodes");
            return Err(SearchError::Aborted { nodes });
        }

        let mover = side_to_move(last_move);
        if depth == 0 {
            return Ok(self.scorer.score(position, mover));
        }

        let mut children: Vec<(f64, ChessMove, Position)> = self
            .generator
            .generate_moves(position, mover, last_move)?
            .into_iter()
            .map(|generated| {
                let gain = self.scorer.score(&generated.position_after, mover);
                (gain, generated.chess_move, generated.position_after)
            })
            .collect();
        children.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut max = alpha;
        for (_, chess_move, child) in &children {
            let score = -self.negamax(child, Some(*chess_move), depth - 1, -beta, -max, state)?;
            if score > max {
                max = score;
            }
            if max >= beta {
                break;
            }
        }
        Ok(max)
    }
}

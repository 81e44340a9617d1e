//! The move generator seam and its error type.
//!
//! Search and perft only see `MoveGenerator`, so a generator can be swapped
//! without touching either.

use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("move generation is not implemented")]
    NotImplemented,
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// A generated move together with the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub position_after: Position,
}

/// Enumerates the moves of `side` in `position`.
///
/// `last_move` is the move that produced `position`; it is only consulted for
/// en passant and is `None` at the start of a game.
pub trait MoveGenerator: Send + Sync {
    fn generate_moves(
        &self,
        position: &Position,
        side: Color,
        last_move: Option<ChessMove>,
    ) -> MoveGenResult<Vec<GeneratedMove>>;
}

pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn generate_moves(
        &self,
        _position: &Position,
        _side: Color,
        _last_move: Option<ChessMove>,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        Err(MoveGenerationError::NotImplemented)
    }
}

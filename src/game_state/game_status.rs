//! Game status classification.
//!
//! Material is examined before moves, so a bare-kings position reports `Tie`
//! even when the side to move also has no moves.

use crate::game_state::chess_rules::{DARK_SQUARES, LIGHT_SQUARES};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_moves, Legality};
use crate::moves::move_descriptions::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    None,
    Check,
    Checkmate,
    Stalemate,
    /// The side to move can no longer deliver mate.
    InsufficientMaterial,
    /// Neither side can deliver mate.
    Tie,
}

impl GameStatus {
    #[inline]
    pub const fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::None | GameStatus::Check)
    }
}

/// Side to move after `last_move`; light opens the game.
#[inline]
pub fn side_to_move(last_move: Option<ChessMove>) -> Color {
    last_move.map_or(Color::Light, |mv| mv.side().opposite())
}

/// Classifies `position` for the side to move after `last_move`.
pub fn game_status(position: &Position, last_move: Option<ChessMove>) -> GameStatus {
    let mover = side_to_move(last_move);

    let mover_can_mate = has_mating_material(position, mover);
    if !mover_can_mate && !has_mating_material(position, mover.opposite()) {
        return GameStatus::Tie;
    }
    if !mover_can_mate {
        return GameStatus::InsufficientMaterial;
    }

    let in_check = is_in_check(position, mover);
    let has_moves = !generate_moves(position, mover, last_move, Legality::Legal).is_empty();
    match (in_check, has_moves) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::None,
    }
}

/// King plus enough material to force mate: any queen, rook or pawn, bishops
/// on both square colours, bishop and knight, or three knights.
pub fn has_mating_material(position: &Position, color: Color) -> bool {
    if position.pieces(color, PieceKind::King) == 0 {
        return false;
    }
    let count = |kind| position.pieces(color, kind).count_ones();
    let bishops = position.pieces(color, PieceKind::Bishop);
    let knights = count(PieceKind::Knight);

    count(PieceKind::Queen) + count(PieceKind::Rook) + count(PieceKind::Pawn) > 0
        || (bishops & LIGHT_SQUARES != 0 && bishops & DARK_SQUARES != 0)
        || (bishops != 0 && knights > 0)
        || knights >= 3
}

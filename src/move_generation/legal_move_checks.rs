//! Attack maps and check detection.
//!
//! Attack maps here are raw attacks: they never run the legality filter, so
//! the filter can call them without recursing.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::{generate_moves, Legality};
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Union of every square attacked by `attacker`.
pub fn attacked_squares(position: &Position, attacker: Color) -> Bitboard {
    let occupancy = position.occupancy_all();
    let diagonal = position.pieces(attacker, PieceKind::Bishop) | position.pieces(attacker, PieceKind::Queen);
    let orthogonal = position.pieces(attacker, PieceKind::Rook) | position.pieces(attacker, PieceKind::Queen);

    pawn_attacks(attacker, position.pieces(attacker, PieceKind::Pawn))
        | knight_attacks(position.pieces(attacker, PieceKind::Knight))
        | bishop_attacks(diagonal, occupancy)
        | rook_attacks(orthogonal, occupancy)
        | king_attacks(position.pieces(attacker, PieceKind::King))
}

#[inline]
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    attacked_squares(position, attacker) & square_bit(square) != 0
}

/// True if the king of `color` stands on a square the opponent attacks.
/// A side without a king is never in check.
#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    let kings = position.pieces(color, PieceKind::King);
    kings != 0 && attacked_squares(position, color.opposite()) & kings != 0
}

/// Validates a move against the legal moves of its side.
///
/// The packed form is re-checked first so a corrupted move is reported as an
/// error instead of silently failing to match.
pub fn is_move_legal(
    position: &Position,
    chess_move: ChessMove,
    last_move: Option<ChessMove>,
) -> MoveGenResult<bool> {
    let chess_move = ChessMove::from_bits(chess_move.bits())?;
    Ok(generate_moves(position, chess_move.side(), last_move, Legality::Legal)
        .iter()
        .any(|generated| generated.chess_move == chess_move))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_attacks_cover_third_rank() {
        let pos = Position::start();
        let attacked = attacked_squares(&pos, Color::Light);

        assert_eq!(attacked & 0x0000_0000_00FF_0000, 0x0000_0000_00FF_0000);
        assert_eq!(attacked & 0xFFFF_FFFF_FF00_0000, 0);
        assert!(!is_in_check(&pos, Color::Light));
        assert!(!is_in_check(&pos, Color::Dark));
    }

    #[test]
    fn sliding_attack_is_blocked() {
        let pos = Position::empty()
            .with_piece(4, Color::Light, PieceKind::King)
            .with_piece(60, Color::Dark, PieceKind::Rook);
        assert!(is_in_check(&pos, Color::Light));

        let blocked = pos.with_piece(36, Color::Light, PieceKind::Knight);
        assert!(!is_in_check(&blocked, Color::Light));
        assert!(is_square_attacked(&blocked, 36, Color::Dark));
    }

    #[test]
    fn pawn_attacks_count_on_empty_squares() {
        let pos = Position::empty().with_piece(51, Color::Dark, PieceKind::Pawn);
        assert!(is_square_attacked(&pos, 42, Color::Dark));
        assert!(is_square_attacked(&pos, 44, Color::Dark));
        assert!(!is_square_attacked(&pos, 43, Color::Dark));
    }

    #[test]
    fn kingless_side_is_never_in_check() {
        let pos = Position::empty().with_piece(0, Color::Dark, PieceKind::Queen);
        assert!(!is_in_check(&pos, Color::Light));
    }

    #[test]
    fn move_legality_checks_against_generated_moves() {
        let pos = Position::start();
        let push = ChessMove::derive(&pos, 12, 28, None).expect("e2 pawn exists");
        let triple = ChessMove::derive(&pos, 12, 36, None).expect("e2 pawn exists");

        assert_eq!(is_move_legal(&pos, push, None), Ok(true));
        assert_eq!(is_move_legal(&pos, triple, None), Ok(false));
    }

    #[test]
    fn pinned_piece_move_is_illegal() {
        // light king e1, knight e2 pinned by dark rook e8
        let pos = Position::empty()
            .with_piece(4, Color::Light, PieceKind::King)
            .with_piece(12, Color::Light, PieceKind::Knight)
            .with_piece(60, Color::Dark, PieceKind::Rook);
        let jump = ChessMove::derive(&pos, 12, 29, None).expect("knight on e2");
        assert_eq!(is_move_legal(&pos, jump, None), Ok(false));
    }
}

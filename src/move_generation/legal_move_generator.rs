//! Move generation pipeline.
//!
//! Targets for each piece kind come from a dispatch table of shift kernels.
//! Pawn specials (promotion, en passant) and castling are layered on top, and
//! the optional legality filter drops moves that leave the mover's king
//! attacked.

use crate::game_state::chess_rules::{
    promotion_rank, pawn_step, KINGSIDE_ROOK_START, KING_START, QUEENSIDE_ROOK_START,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::{attacked_squares, is_in_check};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::bishop_moves::bishop_targets;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::{ChessMove, MoveKind};
use crate::moves::pawn_moves::{pawn_captures, pawn_pushes};
use crate::moves::queen_moves::queen_targets;
use crate::moves::ray_shifts::{EAST, WEST};
use crate::moves::rook_moves::rook_targets;

/// Whether generated moves are filtered for self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Legal,
    PseudoLegal,
}

/// Occupancy masks seen by the side to move.
#[derive(Debug, Clone, Copy)]
struct BoardMasks {
    side: Color,
    own: Bitboard,
    enemy: Bitboard,
    empty: Bitboard,
    moved: Bitboard,
}

type TargetFn = fn(Bitboard, &BoardMasks) -> Bitboard;

fn pawn_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    pawn_pushes(masks.side, piece, masks.empty, masks.moved) | pawn_captures(masks.side, piece, masks.enemy)
}

fn knight_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    knight_targets(piece, masks.own)
}

fn bishop_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    bishop_targets(piece, masks.own, masks.enemy)
}

fn rook_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    rook_targets(piece, masks.own, masks.enemy)
}

fn queen_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    queen_targets(piece, masks.own, masks.enemy)
}

fn king_target_fn(piece: Bitboard, masks: &BoardMasks) -> Bitboard {
    king_targets(piece, masks.own)
}

/// Indexed by `PieceKind::index()`.
const TARGETS: [TargetFn; 6] = [
    pawn_target_fn,
    knight_target_fn,
    bishop_target_fn,
    rook_target_fn,
    queen_target_fn,
    king_target_fn,
];

/// Applies every legal move of `side`.
pub struct LegalMoveGenerator;

/// Skips the self-check filter; used for mobility counts and perft checks.
pub struct PseudoLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(
        &self,
        position: &Position,
        side: Color,
        last_move: Option<ChessMove>,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        Ok(generate_moves(position, side, last_move, Legality::Legal))
    }
}

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(
        &self,
        position: &Position,
        side: Color,
        last_move: Option<ChessMove>,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        Ok(generate_moves(position, side, last_move, Legality::PseudoLegal))
    }
}

/// Moves of `side` in `position`, each paired with its successor position.
pub fn generate_moves(
    position: &Position,
    side: Color,
    last_move: Option<ChessMove>,
    legality: Legality,
) -> Vec<GeneratedMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);
    generate_pseudo_moves_in_place(position, side, last_move, &mut pseudo);

    let mut out = Vec::with_capacity(pseudo.len());
    for chess_move in pseudo {
        let position_after = position.apply_move(chess_move);
        if legality == Legality::Legal && is_in_check(&position_after, side) {
            continue;
        }
        out.push(GeneratedMove {
            chess_move,
            position_after,
        });
    }
    out
}

/// Legal moves only, without successor positions.
pub fn legal_moves(position: &Position, side: Color, last_move: Option<ChessMove>) -> Vec<ChessMove> {
    generate_moves(position, side, last_move, Legality::Legal)
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect()
}

/// Number of moves for a single piece standing on `square`, unfiltered.
///
/// Castling and en passant are not counted.
pub fn piece_mobility(position: &Position, color: Color, square: Square) -> u32 {
    let Some(kind) = position.piece_of_color_at(color, square) else {
        return 0;
    };
    let masks = board_masks(position, color);
    TARGETS[kind.index()](square_bit(square), &masks).count_ones()
}

fn board_masks(position: &Position, side: Color) -> BoardMasks {
    let own = position.occupancy(side);
    let enemy = position.occupancy(side.opposite());
    BoardMasks {
        side,
        own,
        enemy,
        empty: !(own | enemy),
        moved: position.moved_mask(),
    }
}

/// Appends every pseudo-legal move of `side` to `out`.
pub fn generate_pseudo_moves_in_place(
    position: &Position,
    side: Color,
    last_move: Option<ChessMove>,
    out: &mut Vec<ChessMove>,
) {
    let masks = board_masks(position, side);
    let enemy_side = side.opposite();
    let back_rank = promotion_rank(side);

    for kind in ALL_PIECE_KINDS {
        let target_fn = TARGETS[kind.index()];
        for from in squares_of(position.pieces(side, kind)) {
            let first_move = !position.has_moved(from);
            for to in squares_of(target_fn(square_bit(from), &masks)) {
                let captured = position.piece_of_color_at(enemy_side, to);
                if kind == PieceKind::Pawn && back_rank & square_bit(to) != 0 {
                    for promoted in PROMOTION_KINDS {
                        out.push(ChessMove::new(
                            side,
                            MoveKind::Promotion,
                            kind,
                            captured,
                            Some(promoted),
                            from,
                            to,
                            first_move,
                        ));
                    }
                } else {
                    out.push(ChessMove::new(
                        side,
                        MoveKind::Standard,
                        kind,
                        captured,
                        None,
                        from,
                        to,
                        first_move,
                    ));
                }
            }
        }
    }

    push_en_passant(position, side, last_move, out);
    push_castles(position, &masks, out);
}

fn push_en_passant(position: &Position, side: Color, last_move: Option<ChessMove>, out: &mut Vec<ChessMove>) {
    let Some(last) = last_move else {
        return;
    };
    if last.side() == side || !last.is_double_pawn_push() {
        return;
    }

    let victim = last.to();
    let victim_bit = square_bit(victim);
    if position.pieces(side.opposite(), PieceKind::Pawn) & victim_bit == 0 {
        return;
    }

    let target = pawn_step(side, victim);
    if position.occupancy_all() & square_bit(target) != 0 {
        return;
    }

    let capturers = position.pieces(side, PieceKind::Pawn) & (EAST.apply(victim_bit) | WEST.apply(victim_bit));
    for from in squares_of(capturers) {
        out.push(ChessMove::new(
            side,
            MoveKind::EnPassant,
            PieceKind::Pawn,
            Some(PieceKind::Pawn),
            None,
            from,
            target,
            !position.has_moved(from),
        ));
    }
}

fn push_castles(position: &Position, masks: &BoardMasks, out: &mut Vec<ChessMove>) {
    let side = masks.side;
    if !position.king_unmoved(side) {
        return;
    }
    let king_from = KING_START[side.index()];
    let rooks = position.pieces(side, PieceKind::Rook);

    // (rook square, squares that must be empty, king destination)
    let wings = [
        (
            KINGSIDE_ROOK_START[side.index()],
            square_bit(king_from + 1) | square_bit(king_from + 2),
            king_from + 2,
        ),
        (
            QUEENSIDE_ROOK_START[side.index()],
            square_bit(king_from - 1) | square_bit(king_from - 2) | square_bit(king_from - 3),
            king_from - 2,
        ),
    ];

    let mut enemy_attacks: Option<Bitboard> = None;
    for (rook_square, transit, king_to) in wings {
        if rooks & square_bit(rook_square) == 0 || position.has_moved(rook_square) {
            continue;
        }
        if transit & !masks.empty != 0 {
            continue;
        }

        let attacks = *enemy_attacks.get_or_insert_with(|| attacked_squares(position, side.opposite()));
        let king_path = square_bit(king_from) | square_bit((king_from + king_to) / 2) | square_bit(king_to);
        if attacks & king_path != 0 {
            continue;
        }

        out.push(ChessMove::new(
            side,
            MoveKind::Castle,
            PieceKind::King,
            None,
            None,
            king_from,
            king_to,
            true,
        ));
    }
}

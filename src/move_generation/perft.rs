//! Perft node counting for move generator regression checks.

use std::thread;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::move_descriptions::{ChessMove, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }

    fn count_leaf(&mut self, generated: &GeneratedMove) {
        let mv = generated.chess_move;
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        match mv.kind() {
            MoveKind::EnPassant => self.en_passant += 1,
            MoveKind::Castle => self.castles += 1,
            MoveKind::Promotion => self.promotions += 1,
            MoveKind::Standard => {}
        }
        if is_in_check(&generated.position_after, mv.side().opposite()) {
            self.checks += 1;
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    side: Color,
    last_move: Option<ChessMove>,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    for generated in generator.generate_moves(position, side, last_move)? {
        perft_recurse(generator, &generated, depth - 1, &mut total)?;
    }
    Ok(total)
}

/// Splits the root moves across scoped worker threads.
pub fn perft_multi_threaded<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    side: Color,
    last_move: Option<ChessMove>,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return perft(generator, position, side, last_move, depth);
    }

    let root_moves = generator.generate_moves(position, side, last_move)?;
    thread::scope(|scope| -> MoveGenResult<PerftCounts> {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|generated| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(generator, generated, depth - 1, &mut local).map(|_| local)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let local = handle.join().map_err(|_| {
                MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
            })??;
            total.merge(local);
        }
        Ok(total)
    })
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    generated: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if remaining == 0 {
        counts.count_leaf(generated);
        return Ok(());
    }

    let mv = generated.chess_move;
    let replies = generator.generate_moves(&generated.position_after, mv.side().opposite(), Some(mv))?;
    for child in &replies {
        perft_recurse(generator, child, remaining - 1, counts)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::NullMoveGenerator;

    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8, light to move
    fn endgame_position() -> Position {
        Position::empty()
            .with_piece(50, Color::Dark, PieceKind::Pawn)
            .with_piece(43, Color::Dark, PieceKind::Pawn)
            .with_piece(32, Color::Light, PieceKind::King)
            .with_piece(33, Color::Light, PieceKind::Pawn)
            .with_piece(39, Color::Dark, PieceKind::Rook)
            .with_piece(25, Color::Light, PieceKind::Rook)
            .with_piece(29, Color::Dark, PieceKind::Pawn)
            .with_piece(31, Color::Dark, PieceKind::King)
            .with_piece(12, Color::Light, PieceKind::Pawn)
            .with_piece(14, Color::Light, PieceKind::Pawn)
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&NullMoveGenerator, &Position::start(), Color::Light, None, 0)
            .expect("depth zero never generates");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn generator_errors_propagate() {
        let result = perft(&NullMoveGenerator, &Position::start(), Color::Light, None, 1);
        assert_eq!(result, Err(MoveGenerationError::NotImplemented));
    }

    #[test]
    fn start_position_node_counts() {
        let pos = Position::start();
        let expected = [20, 400, 8902];
        for (depth, nodes) in (1u8..=3).zip(expected) {
            let counts = perft(&LegalMoveGenerator, &pos, Color::Light, None, depth).expect("perft should run");
            assert_eq!(counts.nodes, nodes, "depth {depth}");
        }
    }

    #[test]
    fn start_position_depth_three_breakdown() {
        let counts = perft(&LegalMoveGenerator, &Position::start(), Color::Light, None, 3).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
            }
        );
    }

    #[test]
    fn endgame_position_node_counts() {
        let pos = endgame_position();
        let expected = [14, 191, 2812];
        for (depth, nodes) in (1u8..=3).zip(expected) {
            let counts = perft(&LegalMoveGenerator, &pos, Color::Light, None, depth).expect("perft should run");
            assert_eq!(counts.nodes, nodes, "depth {depth}");
        }
    }

    #[test]
    fn endgame_position_depth_three_has_two_en_passant_captures() {
        let counts = perft(&LegalMoveGenerator, &endgame_position(), Color::Light, None, 3).expect("perft should run");
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.captures, 209);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let pos = Position::start();
        let single = perft(&LegalMoveGenerator, &pos, Color::Light, None, 3).expect("perft should run");
        let multi = perft_multi_threaded(&LegalMoveGenerator, &pos, Color::Light, None, 3).expect("perft should run");
        assert_eq!(single, multi);
    }
}

//! Crate root module declarations for the bitboard chess core.
//!
//! Exposes the board representation, shift-based attack kernels, move
//! generation, status analysis and the iterative-deepening search so tests,
//! benches and embedding engines can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_status;
    pub mod position;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod ray_shifts;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod aspiration_window;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod threading;
}

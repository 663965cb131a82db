//! Crate root module declarations for the PGN replay library.
//!
//! Two subsystems compose as a pipeline: the notation layer turns PGN
//! movetext into a variation tree, and the mailbox board replays SAN moves
//! from that tree, producing FEN and GBR encodings along the way.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod trial_snapshot;
}

pub mod move_generation {
    pub mod attacks;
    pub mod move_apply;
    pub mod san_resolver;
}

pub mod notation {
    pub mod movetext_parser;
    pub mod san_grammar;
    pub mod tokenizer;
    pub mod variation;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod gbr;
    pub mod pgn;
    pub mod replay;
}

//! Error types for movetext parsing, board updates, replay and PGN reading.
//!
//! Lexical anomalies never surface here: the tokenizer folds them into
//! `TokenKind::Unknown` and the parser reports them as unexpected tokens.

use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::notation::tokenizer::TokenKind;
use crate::notation::variation::PlyIndex;

/// Syntax errors raised while turning movetext into a variation tree.
/// Any of these abandons the whole game's movetext.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MovetextError {
    /// A `)` with no open variation.
    #[error("non matched ')'")]
    UnmatchedCloseParen,

    /// End of input inside a parenthesised variation.
    #[error("non closing RAV. unexpected EOF")]
    UnterminatedVariation,

    #[error("move number mismatch. Expected {expected} got {found}")]
    MoveNumberMismatch { expected: u16, found: u16 },

    #[error("move order mismatch. Expected {expected} got {found}")]
    MoveOrderMismatch { expected: Color, found: Color },

    #[error("invalid move number '{0}'")]
    InvalidMoveNumber(String),

    #[error("mismatched SAN '{0}'")]
    InvalidSan(String),

    #[error("invalid NAG '${0}'")]
    InvalidNag(String),

    #[error("annotation glyph ${0} has no move to attach to")]
    NagWithoutMove(u8),

    #[error("variation opened before any move")]
    VariationWithoutMove,

    #[error("variations nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("unexpected token {kind:?} '{text}'")]
    UnexpectedToken { kind: TokenKind, text: String },

    /// Failure inside a nested variation, wrapped once per level.
    #[error("cannot parse RAV section: {0}")]
    Variation(Box<MovetextError>),
}

/// Position errors: one failed FEN decode or one rejected move.
/// A failed call leaves the board exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("san {0:?} is not a valid move")]
    InvalidSan(String),

    #[error("there are no candidate moves for {san}")]
    NoCandidates { san: String },

    #[error("there are {count} candidate moves for {san}")]
    AmbiguousMove { san: String, count: usize },

    #[error("invalid move. King at {king} is attacked by {attacker}")]
    KingInCheck { king: String, attacker: String },

    #[error("{color} cannot castle with {san}: {reason}")]
    CastlingUnavailable {
        san: String,
        color: Color,
        reason: &'static str,
    },

    #[error("no piece on {0}")]
    EmptyOrigin(String),

    #[error("line starts with {line} to move but the board has {board} to move")]
    SideToMoveMismatch { board: Color, line: Color },
}

/// A board failure located at one ply of a variation tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot replay {index} {san}: {source}")]
pub struct ReplayError {
    /// Zero-based ply offset within its variation.
    pub ply: usize,
    pub index: PlyIndex,
    pub san: String,
    pub source: BoardError,
}

/// Errors surfaced by the PGN game reader and its convenience helpers.
#[derive(Error, Debug)]
pub enum PgnError {
    #[error("I/O error while reading PGN: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Movetext(#[from] MovetextError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

pub type MovetextResult<T> = Result<T, MovetextError>;
pub type BoardResult<T> = Result<T, BoardError>;
pub type ReplayResult<T> = Result<T, ReplayError>;
pub type PgnResult<T> = Result<T, PgnError>;

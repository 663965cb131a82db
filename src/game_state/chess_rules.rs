//! Canonical chess-rule and notation constants.
//!
//! Static literals used to initialise boards, decode annotation glyphs and
//! bound the movetext parser.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of whitespace-separated fields a FEN record must carry.
pub const FEN_FIELD_COUNT: usize = 6;

/// Half-move clock written by the FEN generator; the clock is not tracked.
pub const HALFMOVE_CLOCK_PLACEHOLDER: u16 = 0;

/// SAN text of a null move.
pub const NULL_MOVE_SAN: &str = "--";

/// Result markers accepted in movetext.
pub const RESULT_WHITE_WINS: &str = "1-0";
pub const RESULT_BLACK_WINS: &str = "0-1";
pub const RESULT_DRAW: &str = "1/2-1/2";
pub const RESULT_UNFINISHED: &str = "*";

/// Numeric annotation glyphs produced by move suffixes.
pub const NAG_GOOD_MOVE: u8 = 1;
pub const NAG_POOR_MOVE: u8 = 2;
pub const NAG_VERY_GOOD_MOVE: u8 = 3;
pub const NAG_VERY_POOR_MOVE: u8 = 4;
pub const NAG_SPECULATIVE_MOVE: u8 = 5;
pub const NAG_QUESTIONABLE_MOVE: u8 = 6;

/// Suffix to glyph table, two-character suffixes first so they win.
pub const MOVE_SUFFIX_NAGS: [(&str, u8); 6] = [
    ("!!", NAG_VERY_GOOD_MOVE),
    ("??", NAG_VERY_POOR_MOVE),
    ("!?", NAG_SPECULATIVE_MOVE),
    ("?!", NAG_QUESTIONABLE_MOVE),
    ("!", NAG_GOOD_MOVE),
    ("?", NAG_POOR_MOVE),
];

/// Default bound on nested `( ... )` variations.
pub const DEFAULT_MAX_VARIATION_DEPTH: usize = 64;

/// Every GBR digit is capped at this value.
pub const GBR_FIELD_CAP: usize = 9;

/// Back-rank a-file squares (a1, a8) in mailbox coordinates.
pub const WHITE_BACK_RANK: Square = 21;
pub const BLACK_BACK_RANK: Square = 91;

/// File offsets from the a-file along a back rank.
pub const KING_HOME_FILE: Square = 4;
pub const KINGSIDE_ROOK_FILE: Square = 7;
pub const QUEENSIDE_ROOK_FILE: Square = 0;

//! Square conversions between algebraic coordinates and mailbox indices.
//!
//! Rank/file `(0..8, 0..8)` maps to mailbox index `21 + rank * 10 + file`,
//! so `a1 == 21`, `h1 == 28` and `h8 == 98`.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::Square;

/// Mailbox index of the zero-based `rank` and `file`.
#[inline]
pub const fn square_index(rank: u8, file: u8) -> Square {
    21 + rank * 10 + file
}

/// Zero-based rank of an on-board mailbox square.
#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 10 - 2
}

/// Zero-based file of an on-board mailbox square.
#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 10 - 1
}

/// True for the 64 playable squares of the mailbox.
#[inline]
pub const fn is_on_board(square: Square) -> bool {
    let row = square / 10;
    let column = square % 10;
    row >= 2 && row <= 9 && column >= 1 && column <= 8
}

/// Step `square` by a signed mailbox offset.
///
/// Callers only step from playable squares by at most 21, which the
/// two-row sentinel border absorbs without leaving the array.
#[inline]
pub const fn offset(square: Square, delta: i8) -> Square {
    (square as i16 + delta as i16) as Square
}

/// Convert algebraic notation (for example: "e4") to a mailbox index.
pub fn algebraic_to_square(text: &str) -> BoardResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(BoardError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(BoardError::InvalidSquare(text.to_owned()));
    }

    Ok(square_index(rank - b'1', file - b'a'))
}

/// Convert an on-board mailbox index to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, is_on_board, offset, square_to_algebraic};

    #[test]
    fn corner_squares_map_to_mailbox_indices() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 21);
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), 28);
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), 91);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 98);
        assert_eq!(square_to_algebraic(21), "a1");
        assert_eq!(square_to_algebraic(98), "h8");
        assert_eq!(square_to_algebraic(55), "e4");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        for text in ["i1", "a9", "a0", "e", "e44", ""] {
            assert!(algebraic_to_square(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn border_cells_are_off_board() {
        assert!(!is_on_board(20));
        assert!(!is_on_board(29));
        assert!(!is_on_board(offset(21, -10)));
        assert!(!is_on_board(offset(98, 21)));
        assert!(is_on_board(offset(21, 21)));
    }
}

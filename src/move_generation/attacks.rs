//! Attack and reachability scans over the mailbox.
//!
//! Every scan starts on a playable square and walks fixed offsets or rays;
//! a ray stops at the first occupied cell or at the sentinel border.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::offset;

pub const KNIGHT_OFFSETS: [i8; 8] = [21, 12, 8, 19, -21, -12, -8, -19];
pub const KING_OFFSETS: [i8; 8] = [9, 11, -9, -11, 1, 10, -1, -10];
pub const DIAGONAL_OFFSETS: [i8; 4] = [9, 11, -9, -11];
pub const STRAIGHT_OFFSETS: [i8; 4] = [1, 10, -1, -10];

/// Offsets from a target square back to the pawns of `color` that capture it.
#[inline]
pub const fn pawn_capture_origins(color: Color) -> [i8; 2] {
    match color {
        Color::White => [-9, -11],
        Color::Black => [9, 11],
    }
}

/// Offset from a square back towards where a pawn of `color` pushes from.
#[inline]
pub const fn pawn_push_origin(color: Color) -> i8 {
    match color {
        Color::White => -10,
        Color::Black => 10,
    }
}

/// Squares holding a piece of `color` that attacks `square` in one ply.
///
/// Enumeration order is knights, king, diagonal sliders, straight sliders,
/// pawns. Callers only use membership and count.
pub fn attackers_of(board: &Board, square: Square, color: Color) -> Vec<Square> {
    let mut attackers = Vec::<Square>::new();

    for delta in KNIGHT_OFFSETS {
        let from = offset(square, delta);
        if board.cell(from).holds(color, PieceKind::Knight) {
            attackers.push(from);
        }
    }

    for delta in KING_OFFSETS {
        let from = offset(square, delta);
        if board.cell(from).holds(color, PieceKind::King) {
            attackers.push(from);
        }
    }

    collect_ray_attackers(board, square, color, &DIAGONAL_OFFSETS, PieceKind::Bishop, &mut attackers);
    collect_ray_attackers(board, square, color, &STRAIGHT_OFFSETS, PieceKind::Rook, &mut attackers);

    for delta in pawn_capture_origins(color) {
        let from = offset(square, delta);
        if board.cell(from).holds(color, PieceKind::Pawn) {
            attackers.push(from);
        }
    }

    attackers
}

fn collect_ray_attackers(
    board: &Board,
    square: Square,
    color: Color,
    directions: &[i8],
    slider: PieceKind,
    attackers: &mut Vec<Square>,
) {
    for &delta in directions {
        let mut from = offset(square, delta);
        loop {
            match board.cell(from) {
                Cell::Empty => from = offset(from, delta),
                Cell::OffBoard => break,
                Cell::Occupied(piece) => {
                    if piece.color == color
                        && (piece.kind == slider || piece.kind == PieceKind::Queen)
                    {
                        attackers.push(from);
                    }
                    break;
                }
            }
        }
    }
}

/// Squares holding a piece of `color` that can move to `square` in one ply.
///
/// Attackers plus pawn pushes. A destination held by `color` itself is
/// unreachable, and a pawn only moves diagonally onto an enemy piece or the
/// current en-passant target.
pub fn pieces_movable_to(board: &Board, square: Square, color: Color) -> Vec<Square> {
    let target = board.cell(square);
    if target.is_off_board() || target.holds_color(color) {
        return Vec::new();
    }

    let pawn_may_capture = target.holds_color(color.opposite()) || board.en_passant == Some(square);
    let mut candidates: Vec<Square> = attackers_of(board, square, color)
        .into_iter()
        .filter(|&from| pawn_may_capture || !board.cell(from).holds(color, PieceKind::Pawn))
        .collect();

    if target.is_empty() {
        let back = pawn_push_origin(color);
        let one_back = offset(square, back);
        match board.cell(one_back) {
            Cell::Empty => {
                let two_back = offset(one_back, back);
                if let Cell::Occupied(piece) = board.cell(two_back) {
                    if piece.color == color && piece.kind == PieceKind::Pawn && !piece.moved {
                        candidates.push(two_back);
                    }
                }
            }
            cell if cell.holds(color, PieceKind::Pawn) => candidates.push(one_back),
            _ => {}
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::{attackers_of, pieces_movable_to};
    use crate::game_state::chess_types::{Board, Color};
    use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

    fn names(squares: Vec<u8>) -> Vec<String> {
        let mut out: Vec<String> = squares.into_iter().map(square_to_algebraic).collect();
        out.sort();
        out
    }

    fn sq(text: &str) -> u8 {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn sliders_stop_at_first_occupant() {
        let board = Board::from_fen("4k3/8/8/8/1q6/8/8/R3K2R w - - 0 1")
            .expect("test FEN should parse");

        assert_eq!(names(attackers_of(&board, sq("e1"), Color::Black)), vec!["b4"]);
        assert!(attackers_of(&board, sq("d1"), Color::Black).is_empty());
        assert_eq!(names(attackers_of(&board, sq("d1"), Color::White)), vec!["a1", "e1"]);
    }

    #[test]
    fn knights_and_pawns_attack_from_fixed_offsets() {
        let board = Board::from_fen("4k3/8/8/2p1p3/8/2N5/8/4K3 w - - 0 1")
            .expect("test FEN should parse");

        assert_eq!(names(attackers_of(&board, sq("d4"), Color::Black)), vec!["c5", "e5"]);
        assert_eq!(names(attackers_of(&board, sq("d5"), Color::White)), vec!["c3"]);
        assert_eq!(names(attackers_of(&board, sq("e4"), Color::White)), vec!["c3"]);
    }

    #[test]
    fn pawn_pushes_are_movable_but_not_attacks() {
        let board = Board::new();

        assert_eq!(names(pieces_movable_to(&board, sq("e4"), Color::White)), vec!["e2"]);
        assert_eq!(names(pieces_movable_to(&board, sq("e3"), Color::White)), vec!["e2"]);
        assert_eq!(names(pieces_movable_to(&board, sq("e5"), Color::Black)), vec!["e7"]);
        assert_eq!(names(pieces_movable_to(&board, sq("f3"), Color::White)), vec!["f2", "g1"]);
        assert!(pieces_movable_to(&board, sq("e2"), Color::White).is_empty());
        assert!(pieces_movable_to(&board, sq("d3"), Color::White).iter().all(|&s| s != sq("e2")));
    }

    #[test]
    fn pawn_push_is_blocked_by_any_piece() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1")
            .expect("test FEN should parse");

        assert!(pieces_movable_to(&board, sq("e4"), Color::White).is_empty());
        assert!(pieces_movable_to(&board, sq("e3"), Color::White).is_empty());
    }
}

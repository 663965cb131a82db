//! FEN-to-Board parser.
//!
//! Builds a mailbox board from a Forsyth-Edwards Notation record. Short or
//! missing ranks are padded with empty squares. Castling letters and the
//! en-passant field are restored: a missing castling right marks the
//! matching rook (and, with both rights gone, the king) as moved.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::{
    BLACK_BACK_RANK, FEN_FIELD_COUNT, KINGSIDE_ROOK_FILE, KING_HOME_FILE, QUEENSIDE_ROOK_FILE,
    WHITE_BACK_RANK,
};
use crate::game_state::chess_types::*;
use crate::move_generation::attacks::pawn_push_origin;
use crate::utils::algebraic::{algebraic_to_square, offset, rank_of, square_index};

pub fn parse_fen(fen: &str) -> BoardResult<Board> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < FEN_FIELD_COUNT {
        return Err(BoardError::InvalidFen(format!(
            "expected {FEN_FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }
    if fields.len() > FEN_FIELD_COUNT {
        return Err(BoardError::InvalidFen("FEN has extra trailing fields".to_owned()));
    }

    let mut board = Board::empty();

    parse_placement(fields[0], &mut board)?;
    board.active_color = parse_active_color(fields[1])?;
    let rights = parse_castling_rights(fields[2])?;
    board.en_passant = parse_en_passant_square(fields[3], &board)?;
    fields[4]
        .parse::<u16>()
        .map_err(|_| BoardError::InvalidFen(format!("invalid halfmove clock: {}", fields[4])))?;
    board.fullmove_number = fields[5]
        .parse::<u16>()
        .map_err(|_| BoardError::InvalidFen(format!("invalid fullmove number: {}", fields[5])))?;

    apply_castling_rights(&mut board, rights);

    Ok(board)
}

fn parse_placement(placement: &str, board: &mut Board) -> BoardResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() > 8 {
        return Err(BoardError::InvalidFen(
            "board layout has more than 8 ranks".to_owned(),
        ));
    }

    let mut white_kings = Vec::<Square>::new();
    let mut black_kings = Vec::<Square>::new();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(BoardError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(BoardError::InvalidFen(format!(
                        "rank '{rank_str}' has more than 8 files"
                    )));
                }
                continue;
            }

            let mut piece = Piece::from_fen_char(ch).ok_or_else(|| {
                BoardError::InvalidFen(format!("invalid piece character '{ch}' in board layout"))
            })?;
            if file >= 8 {
                return Err(BoardError::InvalidFen(format!(
                    "rank '{rank_str}' has more than 8 files"
                )));
            }

            let square = square_index(rank, file);
            match (piece.color, piece.kind) {
                (Color::White, PieceKind::King) => white_kings.push(square),
                (Color::Black, PieceKind::King) => black_kings.push(square),
                (color, PieceKind::Pawn) => piece.moved = !on_pawn_home_rank(color, square),
                _ => {}
            }
            board.cells[square as usize] = Cell::Occupied(piece);
            file += 1;
        }
    }

    board.white_king = single_king(&white_kings, Color::White)?;
    board.black_king = single_king(&black_kings, Color::Black)?;

    Ok(())
}

fn single_king(kings: &[Square], color: Color) -> BoardResult<Square> {
    match kings {
        [square] => Ok(*square),
        _ => Err(BoardError::InvalidFen(format!(
            "expected exactly one {color} king, found {}",
            kings.len()
        ))),
    }
}

fn on_pawn_home_rank(color: Color, square: Square) -> bool {
    match color {
        Color::White => rank_of(square) == 1,
        Color::Black => rank_of(square) == 6,
    }
}

fn parse_active_color(field: &str) -> BoardResult<Color> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(BoardError::InvalidFen(format!(
            "invalid side-to-move field: {field}"
        ))),
    }
}

fn parse_castling_rights(field: &str) -> BoardResult<CastlingRights> {
    if field == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in field.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(BoardError::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

/// The target must sit behind an enemy pawn that could just have made a
/// double push: rank 6 with white to move, rank 3 with black to move, the
/// pawn in front of it and its origin square behind it empty.
fn parse_en_passant_square(field: &str, board: &Board) -> BoardResult<Option<Square>> {
    if field == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(field)
        .map_err(|_| BoardError::InvalidFen(format!("invalid en-passant square: {field}")))?;

    let mover = board.active_color;
    let expected_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(target) != expected_rank {
        return Err(BoardError::InvalidFen(format!(
            "en-passant square {field} is on the wrong rank for {mover} to move"
        )));
    }

    let victim = offset(target, pawn_push_origin(mover));
    let origin = offset(target, -pawn_push_origin(mover));
    if !board.cell(victim).holds(mover.opposite(), PieceKind::Pawn)
        || !board.cell(target).is_empty()
        || !board.cell(origin).is_empty()
    {
        return Err(BoardError::InvalidFen(format!(
            "en-passant square {field} does not follow a double pawn push"
        )));
    }

    Ok(Some(target))
}

/// Mark pieces as moved so the live castling derivation matches `rights`.
fn apply_castling_rights(board: &mut Board, rights: CastlingRights) {
    for (color, back_rank) in [(Color::White, WHITE_BACK_RANK), (Color::Black, BLACK_BACK_RANK)] {
        let mut lost_both = true;

        for (side, rook_file) in [
            (CastleSide::King, KINGSIDE_ROOK_FILE),
            (CastleSide::Queen, QUEENSIDE_ROOK_FILE),
        ] {
            if rights & side.right(color) != 0 {
                lost_both = false;
            } else {
                mark_moved(board, back_rank + rook_file, color, PieceKind::Rook);
            }
        }

        let king_home = back_rank + KING_HOME_FILE;
        if lost_both || board.king_square(color) != king_home {
            let king = board.king_square(color);
            mark_moved(board, king, color, PieceKind::King);
        }
    }
}

fn mark_moved(board: &mut Board, square: Square, color: Color, kind: PieceKind) {
    if let Cell::Occupied(piece) = board.cells[square as usize] {
        if piece.color == color && piece.kind == kind {
            board.cells[square as usize] = Cell::Occupied(piece.marked_moved());
        }
    }
}

//! SAN interpretation against the board: castling, null moves and the
//! candidate disambiguation pass for ordinary piece moves.

use tracing::trace;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::{
    BLACK_BACK_RANK, KINGSIDE_ROOK_FILE, KING_HOME_FILE, NULL_MOVE_SAN, QUEENSIDE_ROOK_FILE,
    WHITE_BACK_RANK,
};
use crate::game_state::chess_types::*;
use crate::move_generation::attacks::pieces_movable_to;
use crate::move_generation::move_apply::{try_move, ApplyMode};
use crate::notation::san_grammar::BOARD_SAN;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Back-rank files that must be empty for each castling side.
const KINGSIDE_PATH: &[Square] = &[5, 6];
const QUEENSIDE_PATH: &[Square] = &[1, 2, 3];

/// The parts of a piece move the resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanRequest {
    pub piece: PieceKind,
    /// Substring the origin square must contain ("", a file, a rank or a square).
    pub hint: String,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl SanRequest {
    pub fn parse(san: &str) -> BoardResult<Self> {
        let invalid = || BoardError::InvalidSan(san.to_owned());
        let caps = BOARD_SAN.captures(san).ok_or_else(invalid)?;

        let letter = caps.get(1).map_or("", |m| m.as_str());
        let mut hint = caps.get(2).map_or("", |m| m.as_str()).to_owned();
        let destination_text = caps.get(3).ok_or_else(invalid)?.as_str();
        let destination = algebraic_to_square(destination_text)?;

        let piece = match letter.chars().next() {
            Some(ch) => PieceKind::from_san_letter(ch).ok_or_else(invalid)?,
            None => {
                // Bare pawn moves without a hint stay on their own file.
                if hint.is_empty() {
                    hint = destination_text[..1].to_owned();
                }
                PieceKind::Pawn
            }
        };

        let promotion = match caps.get(4) {
            Some(m) => {
                let kind = m.as_str().chars().nth(1).and_then(PieceKind::from_san_letter);
                match kind {
                    Some(PieceKind::Pawn | PieceKind::King) | None => return Err(invalid()),
                    promoted => promoted,
                }
            }
            None => None,
        };

        Ok(Self {
            piece,
            hint,
            destination,
            promotion,
        })
    }
}

/// Apply `san` for `color`, leaving turn bookkeeping to the caller.
pub fn make_move_for(board: &mut Board, san: &str, color: Color) -> BoardResult<()> {
    if san == NULL_MOVE_SAN {
        board.en_passant = None;
        return Ok(());
    }
    if san.starts_with("O-O-O") {
        return castle(board, san, color, CastleSide::Queen);
    }
    if san.starts_with("O-O") {
        return castle(board, san, color, CastleSide::King);
    }

    let request = SanRequest::parse(san)?;
    let origin = resolve_origin(board, san, color, &request)?;
    try_move(
        board,
        ApplyMode::Commit,
        color,
        origin,
        request.destination,
        request.promotion,
    )
}

/// Find the single origin square that can legally play `request`.
pub fn resolve_origin(
    board: &mut Board,
    san: &str,
    color: Color,
    request: &SanRequest,
) -> BoardResult<Square> {
    let candidates = pieces_movable_to(board, request.destination, color);
    let mut qualified = Vec::<Square>::new();

    for from in candidates {
        let Some(piece) = board.cell(from).piece() else {
            continue;
        };
        if piece.kind != request.piece {
            continue;
        }
        if !square_to_algebraic(from).contains(request.hint.as_str()) {
            continue;
        }
        let trial = try_move(
            board,
            ApplyMode::Trial,
            color,
            from,
            request.destination,
            request.promotion,
        );
        match trial {
            Ok(()) => qualified.push(from),
            Err(err) => trace!(san, from = %square_to_algebraic(from), %err, "candidate rejected"),
        }
    }

    trace!(san, qualified = qualified.len(), "candidates resolved");
    match qualified.as_slice() {
        [] => Err(BoardError::NoCandidates {
            san: san.to_owned(),
        }),
        [origin] => Ok(*origin),
        many => Err(BoardError::AmbiguousMove {
            san: san.to_owned(),
            count: many.len(),
        }),
    }
}

/// Relocate king and rook to their castled squares.
///
/// The king's origin, path and destination are not checked for attacks.
fn castle(board: &mut Board, san: &str, color: Color, side: CastleSide) -> BoardResult<()> {
    let back_rank = match color {
        Color::White => WHITE_BACK_RANK,
        Color::Black => BLACK_BACK_RANK,
    };
    let king_from = back_rank + KING_HOME_FILE;
    let (rook_from, king_to, rook_to, between): (Square, Square, Square, &[Square]) = match side {
        CastleSide::King => (
            back_rank + KINGSIDE_ROOK_FILE,
            back_rank + 6,
            back_rank + 5,
            KINGSIDE_PATH,
        ),
        CastleSide::Queen => (
            back_rank + QUEENSIDE_ROOK_FILE,
            back_rank + 2,
            back_rank + 3,
            QUEENSIDE_PATH,
        ),
    };

    let unavailable = |reason: &'static str| BoardError::CastlingUnavailable {
        san: san.to_owned(),
        color,
        reason,
    };

    let king = board.cell(king_from).piece();
    if !matches!(king, Some(p) if p.color == color && p.kind == PieceKind::King && !p.moved) {
        return Err(unavailable("king is not on its home square"));
    }
    let rook = board.cell(rook_from).piece();
    if !matches!(rook, Some(p) if p.color == color && p.kind == PieceKind::Rook && !p.moved) {
        return Err(unavailable("rook is not on its home square"));
    }
    if between
        .iter()
        .any(|file| !board.cell(back_rank + file).is_empty())
    {
        return Err(unavailable("squares between king and rook are occupied"));
    }

    board.cells[king_from as usize] = Cell::Empty;
    board.cells[rook_from as usize] = Cell::Empty;
    board.cells[king_to as usize] = Cell::Occupied(Piece::new(color, PieceKind::King).marked_moved());
    board.cells[rook_to as usize] = Cell::Occupied(Piece::new(color, PieceKind::Rook).marked_moved());
    board.set_king_square(color, king_to);
    board.en_passant = None;

    Ok(())
}

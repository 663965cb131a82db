//! Relocate one piece on the board and verify the mover's king is safe.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::*;
use crate::move_generation::attacks::{attackers_of, pawn_push_origin};
use crate::utils::algebraic::{offset, square_to_algebraic};

/// How a move application treats the board afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Always restore the snapshot, whatever the outcome.
    Trial,
    /// Keep the move on success, restore the snapshot on failure.
    Commit,
}

/// Move the piece on `from` to `to` for `color`.
///
/// Both modes run on a [`TrialSnapshot`]: a trial never leaves a trace,
/// and a failed commit leaves the board exactly as it found it.
pub fn try_move(
    board: &mut Board,
    mode: ApplyMode,
    color: Color,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> BoardResult<()> {
    let snapshot = TrialSnapshot::capture(board, color, from, to);
    let outcome = relocate_and_verify(board, color, from, to, promotion);

    if mode == ApplyMode::Trial || outcome.is_err() {
        snapshot.restore(board);
    }

    outcome
}

fn relocate_and_verify(
    board: &mut Board,
    color: Color,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> BoardResult<()> {
    let mut piece = board
        .cell(from)
        .piece()
        .ok_or_else(|| BoardError::EmptyOrigin(square_to_algebraic(from)))?;

    if piece.kind == PieceKind::Pawn {
        let behind = pawn_push_origin(color);
        let is_double_push = !piece.moved && offset(from, -2 * behind) == to;

        if is_double_push {
            board.en_passant = en_passant_target_after_push(board, color, to);
        } else {
            let victim = offset(to, behind);
            if board.en_passant == Some(to)
                && board.cell(victim).holds(color.opposite(), PieceKind::Pawn)
            {
                board.cells[victim as usize] = Cell::Empty;
            }
            board.en_passant = None;
        }

        if let Some(kind) = promotion {
            piece.kind = kind;
        }
    } else {
        board.en_passant = None;
        if piece.kind == PieceKind::King {
            board.set_king_square(color, to);
        }
    }

    board.cells[to as usize] = Cell::Occupied(piece.marked_moved());
    board.cells[from as usize] = Cell::Empty;

    ensure_king_safe(board, color)
}

/// The square behind a double push, when an enemy pawn could take on it.
fn en_passant_target_after_push(board: &Board, color: Color, to: Square) -> Option<Square> {
    let enemy = color.opposite();
    let capturable = [-1, 1]
        .into_iter()
        .any(|side| board.cell(offset(to, side)).holds(enemy, PieceKind::Pawn));

    capturable.then(|| offset(to, pawn_push_origin(color)))
}

/// Fail when `color`'s king is attacked by the opponent.
pub fn ensure_king_safe(board: &Board, color: Color) -> BoardResult<()> {
    let king = board.king_square(color);
    match attackers_of(board, king, color.opposite()).first() {
        Some(&attacker) => Err(BoardError::KingInCheck {
            king: square_to_algebraic(king),
            attacker: square_to_algebraic(attacker),
        }),
        None => Ok(()),
    }
}

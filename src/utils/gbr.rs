//! GBR material signature.
//!
//! Four piece digits (queens, rooks, bishops, knights) count one per white
//! piece and three per black piece, followed by a period and the white and
//! black pawn counts. Every digit is capped at 9.

use crate::game_state::chess_rules::GBR_FIELD_CAP;
use crate::game_state::chess_types::*;

pub fn generate_gbr(board: &Board) -> String {
    let mut counts = [[0usize; 6]; 2];
    for rank in 0..8 {
        for piece in board.rank_cells(rank).iter().filter_map(|cell| cell.piece()) {
            counts[piece.color.index()][piece.kind.index()] += 1;
        }
    }

    let white = &counts[Color::White.index()];
    let black = &counts[Color::Black.index()];
    let weighted = |kind: PieceKind| (white[kind.index()] + 3 * black[kind.index()]).min(GBR_FIELD_CAP);
    let pawns = |side: &[usize; 6]| side[PieceKind::Pawn.index()].min(GBR_FIELD_CAP);

    format!(
        "{}{}{}{}.{}{}",
        weighted(PieceKind::Queen),
        weighted(PieceKind::Rook),
        weighted(PieceKind::Bishop),
        weighted(PieceKind::Knight),
        pawns(white),
        pawns(black)
    )
}

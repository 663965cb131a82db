use crate::game_state::chess_types::*;
use crate::move_generation::attacks::pawn_push_origin;
use crate::utils::algebraic::offset;

/// Everything a single piece move can touch, captured before the move.
///
/// Restoring puts the board back exactly as it was: origin, destination,
/// the pawn an en-passant capture would remove, the en-passant target and
/// both king squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSnapshot {
    pub from: Square,
    pub from_cell: Cell,
    pub to: Square,
    pub to_cell: Cell,
    pub en_passant_victim: Option<(Square, Cell)>,
    pub en_passant: Option<Square>,
    pub white_king: Square,
    pub black_king: Square,
}

impl TrialSnapshot {
    pub fn capture(board: &Board, color: Color, from: Square, to: Square) -> Self {
        let en_passant_victim = match board.en_passant {
            Some(target) if target == to => {
                let victim = offset(to, pawn_push_origin(color));
                Some((victim, board.cells[victim as usize]))
            }
            _ => None,
        };

        Self {
            from,
            from_cell: board.cells[from as usize],
            to,
            to_cell: board.cells[to as usize],
            en_passant_victim,
            en_passant: board.en_passant,
            white_king: board.white_king,
            black_king: board.black_king,
        }
    }

    pub fn restore(&self, board: &mut Board) {
        if let Some((square, cell)) = self.en_passant_victim {
            board.cells[square as usize] = cell;
        }
        board.cells[self.to as usize] = self.to_cell;
        board.cells[self.from as usize] = self.from_cell;
        board.en_passant = self.en_passant;
        board.white_king = self.white_king;
        board.black_king = self.black_king;
    }
}

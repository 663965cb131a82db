//! Mailbox board state.
//!
//! `Board` is the long-lived position object of the replay engine. It is
//! built once (start position or FEN), then mutated in place once per
//! accepted SAN move. Speculative moves made while disambiguating are
//! always rolled back through [`TrialSnapshot`](crate::game_state::trial_snapshot::TrialSnapshot).

use std::fmt;

use tracing::debug;

use crate::errors::BoardResult;
use crate::game_state::chess_rules::{BLACK_BACK_RANK, KING_HOME_FILE, WHITE_BACK_RANK};
use crate::game_state::chess_types::*;
use crate::move_generation::attacks::{attackers_of, pieces_movable_to};
use crate::move_generation::san_resolver::make_move_for;
use crate::utils::algebraic::{algebraic_to_square, square_index};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::gbr::generate_gbr;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The last move accepted by [`Board::make_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMove {
    pub san: String,
    /// True when white played it.
    pub white: bool,
    /// Full-move number the move belongs to.
    pub number: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [Cell; MAILBOX_SIZE],
    pub(crate) en_passant: Option<Square>,
    pub(crate) white_king: Square,
    pub(crate) black_king: Square,
    pub(crate) active_color: Color,
    pub(crate) last_san: String,
    pub(crate) fullmove_number: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board with no pieces: 64 empty squares inside the sentinel border.
    ///
    /// King squares point at e1/e8 until a loader places the kings.
    pub(crate) fn empty() -> Self {
        let mut cells = [Cell::OffBoard; MAILBOX_SIZE];
        for rank in 0..8 {
            for file in 0..8 {
                cells[square_index(rank, file) as usize] = Cell::Empty;
            }
        }

        Self {
            cells,
            en_passant: None,
            white_king: WHITE_BACK_RANK + KING_HOME_FILE,
            black_king: BLACK_BACK_RANK + KING_HOME_FILE,
            active_color: Color::White,
            last_san: String::new(),
            fullmove_number: 1,
        }
    }

    /// Standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            board.cells[square_index(0, file) as usize] =
                Cell::Occupied(Piece::new(Color::White, *kind));
            board.cells[square_index(1, file) as usize] =
                Cell::Occupied(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[square_index(6, file) as usize] =
                Cell::Occupied(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[square_index(7, file) as usize] =
                Cell::Occupied(Piece::new(Color::Black, *kind));
        }
        board
    }

    #[inline]
    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn gbr(&self) -> String {
        generate_gbr(self)
    }

    /// Apply one SAN move for the side to move.
    ///
    /// On success the side to move flips, the full-move number advances
    /// after a black move, and the SAN is remembered. On failure nothing
    /// about the board changes.
    pub fn make_move(&mut self, san: &str) -> BoardResult<()> {
        let color = self.active_color;
        make_move_for(self, san, color)?;

        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.active_color = color.opposite();
        self.last_san = san.to_owned();

        debug!(san, %color, fen = %self, "move accepted");
        Ok(())
    }

    /// The last accepted move, or `None` before any move.
    pub fn last_move(&self) -> Option<LastMove> {
        if self.last_san.is_empty() {
            return None;
        }

        let white = self.active_color == Color::Black;
        let number = if white {
            self.fullmove_number
        } else {
            self.fullmove_number.saturating_sub(1)
        };

        Some(LastMove {
            san: self.last_san.clone(),
            white,
            number,
        })
    }

    /// Set who makes the next move.
    #[inline]
    pub fn set_turn(&mut self, color: Color) {
        self.active_color = color;
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    #[inline]
    pub(crate) fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square as usize]
    }

    /// Piece on an algebraic square such as `"e4"`.
    pub fn piece_at(&self, square: &str) -> BoardResult<Option<Piece>> {
        Ok(self.cell(algebraic_to_square(square)?).piece())
    }

    /// The eight cells of zero-based `rank`, a-file first.
    pub fn rank_cells(&self, rank: u8) -> &[Cell] {
        let start = square_index(rank, 0) as usize;
        &self.cells[start..start + 8]
    }

    #[inline]
    pub fn attackers_of(&self, square: Square, color: Color) -> Vec<Square> {
        attackers_of(self, square, color)
    }

    #[inline]
    pub fn pieces_movable_to(&self, square: Square, color: Color) -> Vec<Square> {
        pieces_movable_to(self, square, color)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

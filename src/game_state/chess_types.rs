//! Core value types shared by the board engine and the notation layer.
//!
//! The board is a 10x12 mailbox: every square index is a `u8` into a
//! 120-cell array whose two outer ranks and outer files hold
//! [`Cell::OffBoard`] sentinels, so ray and offset scans stop on their own.

use std::fmt;

pub use crate::game_state::board::Board;
pub use crate::game_state::trial_snapshot::TrialSnapshot;

/// Number of cells in the mailbox array (12 rows of 10).
pub const MAILBOX_SIZE: usize = 120;

/// Mailbox square index (`21 == a1`, `98 == h8`).
pub type Square = u8;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn from_white(white: bool) -> Self {
        if white {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// FEN active-colour letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece kind (colour is carried separately on [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Parse an upper-case SAN piece letter (`P`, `N`, `B`, `R`, `Q`, `K`).
    pub fn from_san_letter(letter: char) -> Option<Self> {
        match letter {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn san_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// One board occupant. `moved` only ever goes from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            moved: false,
        }
    }

    #[inline]
    pub const fn marked_moved(self) -> Self {
        Self {
            moved: true,
            ..self
        }
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        let letter = self.kind.san_letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_san_letter(ch.to_ascii_uppercase())?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(color, kind))
    }
}

/// Contents of one mailbox cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    OffBoard,
    Occupied(Piece),
}

impl Cell {
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_off_board(self) -> bool {
        matches!(self, Cell::OffBoard)
    }

    /// True when the cell holds a piece of `color` and `kind`.
    #[inline]
    pub fn holds(self, color: Color, kind: PieceKind) -> bool {
        matches!(self, Cell::Occupied(p) if p.color == color && p.kind == kind)
    }

    #[inline]
    pub fn holds_color(self, color: Color) -> bool {
        matches!(self, Cell::Occupied(p) if p.color == color)
    }
}

/// Castling rights bitmask, used while restoring a position from FEN.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Rights bit for `color` castling on this side.
    pub const fn right(self, color: Color) -> CastlingRights {
        match (color, self) {
            (Color::White, CastleSide::King) => CASTLE_WHITE_KINGSIDE,
            (Color::White, CastleSide::Queen) => CASTLE_WHITE_QUEENSIDE,
            (Color::Black, CastleSide::King) => CASTLE_BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queen) => CASTLE_BLACK_QUEENSIDE,
        }
    }

    pub const fn fen_char(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CastleSide::King) => 'K',
            (Color::White, CastleSide::Queen) => 'Q',
            (Color::Black, CastleSide::King) => 'k',
            (Color::Black, CastleSide::Queen) => 'q',
        }
    }
}

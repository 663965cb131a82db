use crate::game_state::chess_rules::{
    BLACK_BACK_RANK, HALFMOVE_CLOCK_PLACEHOLDER, KINGSIDE_ROOK_FILE, KING_HOME_FILE,
    QUEENSIDE_ROOK_FILE, WHITE_BACK_RANK,
};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(board: &Board) -> String {
    let placement = generate_board_field(board);
    let castling = generate_castling_field(board);
    let en_passant = generate_en_passant_field(board.en_passant_target());

    format!(
        "{} {} {} {} {} {}",
        placement,
        board.active_color().fen_char(),
        castling,
        en_passant,
        HALFMOVE_CLOCK_PLACEHOLDER,
        board.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for cell in board.rank_cells(rank) {
            if let Some(piece) = cell.piece() {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

/// Castling letters derived from the moved flags of kings and corner rooks.
fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for (color, back_rank) in [(Color::White, WHITE_BACK_RANK), (Color::Black, BLACK_BACK_RANK)] {
        let king = board.king_square(color);
        let king_unmoved = king == back_rank + KING_HOME_FILE
            && board.cell(king).piece().is_some_and(|p| !p.moved);
        if !king_unmoved {
            continue;
        }

        for (side, rook_file) in [
            (CastleSide::King, KINGSIDE_ROOK_FILE),
            (CastleSide::Queen, QUEENSIDE_ROOK_FILE),
        ] {
            let rook = board.cell(back_rank + rook_file).piece();
            if rook.is_some_and(|p| p.color == color && p.kind == PieceKind::Rook && !p.moved) {
                out.push(side.fen_char(color));
            }
        }
    }

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(en_passant: Option<Square>) -> String {
    match en_passant {
        Some(square) => square_to_algebraic(square),
        None => "-".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Board;

    #[test]
    fn generate_starting_fen() {
        assert_eq!(generate_fen(&Board::new()), STARTING_POSITION_FEN);
    }

    #[test]
    fn king_move_drops_both_castling_letters() {
        let mut board = Board::new();
        for san in ["e4", "e5", "Ke2", "Ke7"] {
            board.make_move(san).expect("king walk should be legal");
        }
        assert_eq!(
            generate_fen(&board),
            "rnbq1bnr/ppppkppp/8/4p3/4P3/8/PPPPKPPP/RNBQ1BNR w - - 0 3"
        );
    }

    #[test]
    fn rook_move_drops_one_castling_letter() {
        let mut board = Board::new();
        for san in ["h4", "a5", "Rh3", "Ra6"] {
            board.make_move(san).expect("rook lift should be legal");
        }
        assert!(generate_fen(&board).contains(" Qk "));
    }

    #[test]
    fn en_passant_target_is_written() {
        let mut board = Board::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1")
            .expect("test FEN should parse");
        board.make_move("e4").expect("double push should be legal");
        assert_eq!(generate_fen(&board), "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    }
}

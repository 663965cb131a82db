//! Replay a parsed variation tree against a board.

use crate::errors::{BoardError, ReplayError, ReplayResult};
use crate::game_state::chess_types::Board;
use crate::notation::variation::{Ply, PlyIndex, Variation};

/// One replayed ply and the positions reached by its alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayNode {
    pub index: PlyIndex,
    pub san: String,
    /// Position after this ply.
    pub fen: String,
    /// One replayed line per alternative, each started from the position
    /// before this ply.
    pub variations: Vec<Vec<ReplayNode>>,
}

/// A line numbered for one side cannot start on a board where the other
/// side is to move. Move numbers are not compared.
fn check_side_to_move(board: &Board, variation: &Variation) -> ReplayResult<()> {
    let (Some(index), Some(first)) = (variation.start, variation.plies.first()) else {
        return Ok(());
    };

    let to_move = board.active_color();
    if index.color == to_move {
        return Ok(());
    }
    Err(ReplayError {
        ply: 0,
        index,
        san: first.san.clone(),
        source: BoardError::SideToMoveMismatch {
            board: to_move,
            line: index.color,
        },
    })
}

fn apply_ply(board: &mut Board, offset: usize, index: PlyIndex, ply: &Ply) -> ReplayResult<()> {
    board.make_move(&ply.san).map_err(|source| ReplayError {
        ply: offset,
        index,
        san: ply.san.clone(),
        source,
    })
}

/// Play every ply of `variation` on `board`, ignoring alternatives, and
/// return the FEN after each one. Stops at the first rejected move, or
/// before the first one when the line starts with the wrong side to move.
pub fn replay_mainline(board: &mut Board, variation: &Variation) -> ReplayResult<Vec<String>> {
    check_side_to_move(board, variation)?;
    let mut fens = Vec::<String>::with_capacity(variation.len());

    for (offset, (index, ply)) in variation.numbered_plies().enumerate() {
        apply_ply(board, offset, index, ply)?;
        fens.push(board.to_fen());
    }

    Ok(fens)
}

/// Like [`replay_mainline`], also replaying every nested alternative.
/// `board` ends on the last main-line position.
pub fn replay_tree(board: &mut Board, variation: &Variation) -> ReplayResult<Vec<ReplayNode>> {
    check_side_to_move(board, variation)?;
    let mut nodes = Vec::<ReplayNode>::with_capacity(variation.len());

    for (offset, (index, ply)) in variation.numbered_plies().enumerate() {
        let before = board.clone();
        apply_ply(board, offset, index, ply)?;

        let mut variations = Vec::with_capacity(ply.variations.len());
        for alternative in &ply.variations {
            let mut branch = before.clone();
            variations.push(replay_tree(&mut branch, alternative)?);
        }

        nodes.push(ReplayNode {
            index,
            san: ply.san.clone(),
            fen: board.to_fen(),
            variations,
        });
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::{replay_mainline, replay_tree};
    use crate::errors::BoardError;
    use crate::game_state::chess_types::{Board, Color};
    use crate::notation::movetext_parser::parse_movetext;
    use crate::notation::variation::PlyIndex;

    #[test]
    fn mainline_yields_one_fen_per_ply() {
        let variation = parse_movetext("1. e4 c5 *").expect("movetext should parse");
        let mut board = Board::new();

        let fens = replay_mainline(&mut board, &variation).expect("moves should replay");
        assert_eq!(
            fens,
            vec![
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            ]
        );
    }

    #[test]
    fn rejected_move_reports_its_position_in_the_line() {
        let variation = parse_movetext("1. e4 e4 *").expect("movetext should parse");
        let mut board = Board::new();

        let err = replay_mainline(&mut board, &variation).expect_err("black has no e4 move");
        assert_eq!(err.ply, 1);
        assert_eq!(err.index, PlyIndex::new(1, Color::Black));
        assert_eq!(
            err.source,
            BoardError::NoCandidates {
                san: "e4".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot replay 1... e4: there are no candidate moves for e4"
        );
    }

    #[test]
    fn line_must_start_with_the_side_to_move() {
        let variation = parse_movetext("12... Nf6 13. Nc3 *").expect("movetext should parse");
        let mut board = Board::new();
        let before = board.clone();

        let err = replay_mainline(&mut board, &variation).expect_err("white is to move");
        assert_eq!(err.ply, 0);
        assert_eq!(err.index, PlyIndex::new(12, Color::Black));
        assert_eq!(
            err.source,
            BoardError::SideToMoveMismatch {
                board: Color::White,
                line: Color::Black
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot replay 12... Nf6: line starts with black to move but the board has white to move"
        );
        assert_eq!(board, before);
        assert!(replay_tree(&mut board, &variation).is_err());

        let mut board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
                .expect("black-to-move FEN should parse");
        let fens = replay_mainline(&mut board, &variation).expect("black may start the line");
        assert_eq!(fens.len(), 2);
    }

    #[test]
    fn alternatives_start_from_the_replaced_position() {
        let variation = parse_movetext("1. e4 e5 (1... c5 2. Nf3) 2. Nf3 *")
            .expect("movetext should parse");
        let mut board = Board::new();

        let nodes = replay_tree(&mut board, &variation).expect("tree should replay");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].variations.len(), 1);

        let branch = &nodes[1].variations[0];
        assert_eq!(branch[0].index, PlyIndex::new(1, Color::Black));
        assert_eq!(
            branch[0].fen,
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
        );
        assert_eq!(branch[1].san, "Nf3");

        assert_eq!(board.to_fen(), nodes[2].fen);
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 2"
        );
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pgn_replay::game_state::chess_types::Board;

const PIECES: [char; 10] = ['P', 'N', 'B', 'R', 'Q', 'p', 'n', 'b', 'r', 'q'];

/// Random 8x8 layout with exactly one king per colour.
fn random_layout(rng: &mut StdRng) -> [[Option<char>; 8]; 8] {
    let mut layout = [[None; 8]; 8];

    let white_king = rng.random_range(0..64usize);
    let mut black_king = rng.random_range(0..64usize);
    while black_king == white_king {
        black_king = rng.random_range(0..64usize);
    }
    layout[white_king / 8][white_king % 8] = Some('K');
    layout[black_king / 8][black_king % 8] = Some('k');

    for row in layout.iter_mut() {
        for square in row.iter_mut() {
            if square.is_none() && rng.random_bool(0.3) {
                *square = Some(PIECES[rng.random_range(0..PIECES.len())]);
            }
        }
    }

    layout
}

/// Canonical placement: maximal digit runs, every rank complete.
fn canonical_placement(layout: &[[Option<char>; 8]; 8]) -> String {
    let ranks: Vec<String> = layout
        .iter()
        .map(|row| {
            let mut out = String::new();
            let mut empty = 0u8;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(*piece);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            out
        })
        .collect();
    ranks.join("/")
}

/// Loose placement: every empty square as its own `1`, trailing empty
/// squares of a rank left out.
fn loose_placement(layout: &[[Option<char>; 8]; 8]) -> String {
    let ranks: Vec<String> = layout
        .iter()
        .map(|row| {
            let last = row.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
            row[..last]
                .iter()
                .map(|square| square.unwrap_or('1'))
                .collect::<String>()
        })
        .collect();
    ranks.join("/")
}

fn placement_of(fen: &str) -> &str {
    fen.split_whitespace().next().expect("FEN should have a placement field")
}

#[test]
fn random_placements_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed_f3e7);

    for _ in 0..500 {
        let layout = random_layout(&mut rng);
        let canonical = canonical_placement(&layout);

        for placement in [canonical.clone(), loose_placement(&layout)] {
            let fen = format!("{placement} w - - 0 1");
            let board = Board::from_fen(&fen).expect("random placement should parse");
            assert_eq!(placement_of(&board.to_fen()), canonical, "input {fen}");
        }
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let board = Board::from_fen("  4k3/8/8/8/8/8/8/4K3 \t b  -  -  0   12 \n")
        .expect("padded FEN should parse");
    assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 12");
}

#[test]
fn missing_ranks_are_empty() {
    let board = Board::from_fen("4k3///////4K3 w - - 0 1").expect("sparse FEN should parse");
    assert_eq!(placement_of(&board.to_fen()), "4k3/8/8/8/8/8/8/4K3");

    let board = Board::from_fen("4k3/4K3 w - - 0 1").expect("two-rank FEN should parse");
    assert_eq!(placement_of(&board.to_fen()), "4k3/4K3/8/8/8/8/8/8");
}

//! Variation tree built by the movetext parser.
//!
//! A [`Variation`] is one line of play. Each [`Ply`] may carry alternative
//! lines (RAVs) that replace it, so the whole game is a tree rooted at the
//! main line. The tree is read-only once parsed.

use std::fmt;

use crate::game_state::chess_rules::{
    NULL_MOVE_SAN, RESULT_BLACK_WINS, RESULT_DRAW, RESULT_UNFINISHED, RESULT_WHITE_WINS,
};
use crate::game_state::chess_types::Color;

/// Move number plus side to move, e.g. `5.` or `5...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlyIndex {
    pub number: u16,
    pub color: Color,
}

impl PlyIndex {
    #[inline]
    pub const fn new(number: u16, color: Color) -> Self {
        Self { number, color }
    }

    /// The index of the following ply: black replies on the same number,
    /// white moves on the next one.
    pub fn next(self) -> Self {
        match self.color {
            Color::White => Self::new(self.number, Color::Black),
            Color::Black => Self::new(self.number.saturating_add(1), Color::White),
        }
    }
}

impl Default for PlyIndex {
    fn default() -> Self {
        Self::new(1, Color::White)
    }
}

impl fmt::Display for PlyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::White => write!(f, "{}.", self.number),
            Color::Black => write!(f, "{}...", self.number),
        }
    }
}

/// Game termination marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unfinished,
}

impl GameResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => RESULT_WHITE_WINS,
            GameResult::BlackWins => RESULT_BLACK_WINS,
            GameResult::Draw => RESULT_DRAW,
            GameResult::Unfinished => RESULT_UNFINISHED,
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            RESULT_WHITE_WINS => Some(GameResult::WhiteWins),
            RESULT_BLACK_WINS => Some(GameResult::BlackWins),
            RESULT_DRAW => Some(GameResult::Draw),
            RESULT_UNFINISHED => Some(GameResult::Unfinished),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variation {
    /// Index of the first ply, fixed by the first move number or the first
    /// move seen, whichever comes first.
    pub start: Option<PlyIndex>,
    pub plies: Vec<Ply>,
    pub result: Option<GameResult>,
    /// Comments that precede every ply of this line.
    pub comment: String,
}

impl Variation {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    /// SAN of every ply in this line, without alternatives.
    pub fn sans(&self) -> Vec<&str> {
        self.plies.iter().map(|ply| ply.san.as_str()).collect()
    }

    /// Plies paired with their move-number index.
    pub fn numbered_plies(&self) -> impl Iterator<Item = (PlyIndex, &Ply)> + '_ {
        let first = self.start.unwrap_or_default();
        self.plies.iter().scan(first, |index, ply| {
            let current = *index;
            *index = current.next();
            Some((current, ply))
        })
    }

    /// Number of plies in this line and every nested alternative.
    pub fn total_plies(&self) -> usize {
        self.plies
            .iter()
            .map(|ply| 1 + ply.variations.iter().map(Variation::total_plies).sum::<usize>())
            .sum()
    }
}

/// One half-move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ply {
    /// Move text with any `!`/`?` suffix stripped into `nags`.
    pub san: String,
    pub nags: Vec<u8>,
    pub comment: String,
    /// Alternatives to this ply, in textual order.
    pub variations: Vec<Variation>,
}

impl Ply {
    pub fn new(san: impl Into<String>) -> Self {
        Self {
            san: san.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_null_move(&self) -> bool {
        self.san == NULL_MOVE_SAN
    }
}

#[cfg(test)]
mod tests {
    use super::{GameResult, Ply, PlyIndex, Variation};
    use crate::game_state::chess_types::Color;

    #[test]
    fn ply_index_alternates_sides() {
        let index = PlyIndex::new(5, Color::White);
        assert_eq!(index.to_string(), "5.");
        assert_eq!(index.next(), PlyIndex::new(5, Color::Black));
        assert_eq!(index.next().to_string(), "5...");
        assert_eq!(index.next().next(), PlyIndex::new(6, Color::White));
    }

    #[test]
    fn result_tokens_map_both_ways() {
        for text in ["1-0", "0-1", "1/2-1/2", "*"] {
            let result = GameResult::from_token(text).expect("result token should map");
            assert_eq!(result.as_str(), text);
        }
        assert_eq!(GameResult::from_token("2-0"), None);
    }

    #[test]
    fn numbered_plies_follow_the_start_index() {
        let variation = Variation {
            start: Some(PlyIndex::new(12, Color::Black)),
            plies: vec![Ply::new("Nf6"), Ply::new("Nc3"), Ply::new("--")],
            ..Variation::default()
        };

        let labels: Vec<String> = variation
            .numbered_plies()
            .map(|(index, ply)| format!("{index}{}", ply.san))
            .collect();
        assert_eq!(labels, vec!["12...Nf6", "13.Nc3", "13...--"]);
        assert!(variation.plies[2].is_null_move());
        assert_eq!(variation.sans(), vec!["Nf6", "Nc3", "--"]);
    }

    #[test]
    fn total_plies_counts_nested_lines() {
        let mut first = Ply::new("e4");
        first.variations.push(Variation {
            plies: vec![Ply::new("d4"), Ply::new("d5")],
            ..Variation::default()
        });
        let variation = Variation {
            plies: vec![first, Ply::new("e5")],
            ..Variation::default()
        };
        assert_eq!(variation.total_plies(), 4);
        assert_eq!(variation.len(), 2);
    }
}

//! PGN game reader.
//!
//! Splits a PGN stream into games: a block of tag-pair lines followed by
//! the movetext that runs up to the next tag line. Tags are collected into
//! a map and the movetext is handed to the movetext parser on demand.

use std::collections::BTreeMap;
use std::io::BufRead;

use chrono::NaiveDate;
use tracing::warn;

use crate::errors::{BoardError, BoardResult, MovetextResult, PgnResult};
use crate::game_state::chess_types::Board;
use crate::notation::movetext_parser::{parse_movetext, parse_movetext_with_options, ParserOptions};
use crate::notation::san_grammar::TAG_LINE;
use crate::notation::variation::Variation;
use crate::utils::replay::replay_mainline;

/// One game as read from a PGN stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub tags: BTreeMap<String, String>,
    /// Verbatim copy of the game's PGN.
    pub pgn_text: String,
    /// The part of `pgn_text` after the tag lines.
    pub movetext: String,
}

impl Game {
    #[inline]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn parse_movetext(&self) -> MovetextResult<Variation> {
        parse_movetext(&self.movetext)
    }

    pub fn parse_movetext_with_options(&self, options: ParserOptions) -> MovetextResult<Variation> {
        parse_movetext_with_options(&self.movetext, options)
    }

    /// Position the movetext starts from: the `FEN` tag when present
    /// (unless `SetUp` is "0"), otherwise the standard start.
    pub fn starting_board(&self) -> BoardResult<Board> {
        match (self.tag("SetUp"), self.tag("FEN")) {
            (Some("0"), _) | (None, None) => Ok(Board::new()),
            (_, Some(fen)) => Board::from_fen(fen),
            (Some(_), None) => Err(BoardError::InvalidFen(
                "SetUp tag present but FEN tag is missing".to_owned(),
            )),
        }
    }

    /// The `Date` tag as a calendar date. Partially unknown dates such as
    /// `1858.??.??` yield `None`.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.tag("Date")?, "%Y.%m.%d").ok()
    }

    /// Parse the movetext and replay its main line from the starting
    /// board, returning the FEN after every ply.
    pub fn replay_mainline(&self) -> PgnResult<Vec<String>> {
        let variation = self.parse_movetext()?;
        let mut board = self.starting_board()?;
        Ok(replay_mainline(&mut board, &variation)?)
    }
}

/// Tag name and value when `line` is a tag-pair line.
fn match_tag_line(line: &str) -> Option<(String, String)> {
    if !line.starts_with('[') {
        return None;
    }
    let caps = TAG_LINE.captures(line)?;
    Some((caps[1].to_owned(), caps[2].to_owned()))
}

pub struct PgnReader<R> {
    input: R,
    /// A line read ahead and handed back by the next `read_line`.
    pushed_back: Option<String>,
}

impl<R: BufRead> PgnReader<R> {
    /// Wrap `input`, skipping anything before the first tag line.
    pub fn new(input: R) -> PgnResult<Self> {
        let mut reader = Self {
            input,
            pushed_back: None,
        };

        while let Some(line) = reader.read_line()? {
            if match_tag_line(&line).is_some() {
                reader.pushed_back = Some(line);
                break;
            }
        }

        Ok(reader)
    }

    fn read_line(&mut self) -> PgnResult<Option<String>> {
        if let Some(line) = self.pushed_back.take() {
            return Ok(Some(line));
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// The next game, `Ok(None)` once the input is exhausted.
    pub fn next_game(&mut self) -> PgnResult<Option<Game>> {
        loop {
            let mut tags = BTreeMap::<String, String>::new();
            let mut pgn_text = String::new();
            let mut line = None;

            while let Some(next) = self.read_line()? {
                match match_tag_line(&next) {
                    Some((name, value)) => {
                        tags.insert(name, value);
                        pgn_text.push_str(&next);
                    }
                    None => {
                        if next.starts_with('[') {
                            warn!(line = next.trim_end(), "malformed tag line ends the header");
                        }
                        line = Some(next);
                        break;
                    }
                }
            }
            let tags_end = pgn_text.len();

            let Some(first) = line else {
                return Ok(build_game(tags, pgn_text, tags_end));
            };
            if first.trim().is_empty() {
                pgn_text.push('\n');
            } else {
                pgn_text.push_str(&first);
            }

            while let Some(next) = self.read_line()? {
                if match_tag_line(&next).is_some() {
                    self.pushed_back = Some(next);
                    break;
                }
                pgn_text.push_str(&next);
            }

            if let Some(game) = build_game(tags, pgn_text, tags_end) {
                return Ok(Some(game));
            }
            if self.pushed_back.is_none() {
                return Ok(None);
            }
        }
    }
}

/// A game exists only when at least one tag was read.
fn build_game(tags: BTreeMap<String, String>, pgn_text: String, tags_end: usize) -> Option<Game> {
    if tags.is_empty() {
        return None;
    }
    let movetext = pgn_text[tags_end..].to_owned();
    Some(Game {
        tags,
        pgn_text,
        movetext,
    })
}

impl<R: BufRead> Iterator for PgnReader<R> {
    type Item = PgnResult<Game>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_game().transpose()
    }
}

/// Read every game in an in-memory PGN text.
pub fn read_games(pgn: &str) -> PgnResult<Vec<Game>> {
    PgnReader::new(pgn.as_bytes())?.collect()
}

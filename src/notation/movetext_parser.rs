//! Recursive-descent movetext parser.
//!
//! Turns the token stream into a [`Variation`] tree. Every parenthesised
//! alternative is parsed by a nested call, bounded by
//! [`ParserOptions::max_variation_depth`]. Any error abandons the whole
//! movetext; no partial tree is returned.

use tracing::{debug, trace};

use crate::errors::{MovetextError, MovetextResult};
use crate::game_state::chess_rules::{
    DEFAULT_MAX_VARIATION_DEPTH, MOVE_SUFFIX_NAGS, NULL_MOVE_SAN,
};
use crate::game_state::chess_types::Color;
use crate::notation::san_grammar::MOVETEXT_SAN;
use crate::notation::tokenizer::{Token, TokenKind, Tokenizer};
use crate::notation::variation::{GameResult, Ply, PlyIndex, Variation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest RAV nesting accepted; the main line is depth 0.
    pub max_variation_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_variation_depth: DEFAULT_MAX_VARIATION_DEPTH,
        }
    }
}

/// Parse one game's movetext with default options.
pub fn parse_movetext(movetext: &str) -> MovetextResult<Variation> {
    parse_movetext_with_options(movetext, ParserOptions::default())
}

pub fn parse_movetext_with_options(
    movetext: &str,
    options: ParserOptions,
) -> MovetextResult<Variation> {
    let mut parser = MovetextParser::new(movetext, options);
    let mut variation = Variation::default();

    match parser.parse_plies(&mut variation, 0, PlyIndex::default()) {
        Ok(()) => Ok(variation),
        Err(err) => {
            debug!(%err, remaining = parser.tokenizer.remaining().len(), "movetext parse aborted");
            Err(err)
        }
    }
}

pub struct MovetextParser<'a> {
    tokenizer: Tokenizer<'a>,
    options: ParserOptions,
    /// Token read past the periods of a move number, handed out next.
    pending: Option<Token<'a>>,
}

impl<'a> MovetextParser<'a> {
    pub fn new(movetext: &'a str, options: ParserOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(movetext),
            options,
            pending: None,
        }
    }

    fn advance(&mut self) -> Token<'a> {
        self.pending
            .take()
            .unwrap_or_else(|| self.tokenizer.next_token())
    }

    /// Fill `variation` until its terminator.
    ///
    /// `depth` is 0 for the main line. `expected` is the index the next
    /// ply is numbered with.
    pub fn parse_plies(
        &mut self,
        variation: &mut Variation,
        depth: usize,
        mut expected: PlyIndex,
    ) -> MovetextResult<()> {
        let in_variation = depth > 0;
        // Index of the most recent ply, inherited by a RAV opened after it.
        let mut last_index: Option<PlyIndex> = None;

        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::RightParen => {
                    if !in_variation {
                        return Err(MovetextError::UnmatchedCloseParen);
                    }
                    variation.result = Some(GameResult::Unfinished);
                    return Ok(());
                }

                TokenKind::Result | TokenKind::Asterisk => {
                    variation.result = GameResult::from_token(token.text);
                    if !in_variation {
                        return Ok(());
                    }
                }

                TokenKind::Eof => {
                    if in_variation {
                        return Err(MovetextError::UnterminatedVariation);
                    }
                    variation.result = Some(GameResult::Unfinished);
                    return Ok(());
                }

                TokenKind::Integer => {
                    let index = self.read_move_number(token.text)?;
                    match variation.start {
                        Some(_) if index.number != expected.number => {
                            return Err(MovetextError::MoveNumberMismatch {
                                expected: expected.number,
                                found: index.number,
                            });
                        }
                        Some(_) if index.color != expected.color => {
                            return Err(MovetextError::MoveOrderMismatch {
                                expected: expected.color,
                                found: index.color,
                            });
                        }
                        Some(_) => {}
                        None => variation.start = Some(index),
                    }
                    expected = index;
                }

                TokenKind::Symbol | TokenKind::Identifier => {
                    let ply = read_move(token.text)?;
                    variation.start.get_or_insert(expected);
                    variation.plies.push(ply);
                    last_index = Some(expected);
                    expected = expected.next();
                }

                TokenKind::Nag => {
                    let nag = token
                        .text
                        .parse::<u8>()
                        .map_err(|_| MovetextError::InvalidNag(token.text.to_owned()))?;
                    let ply = variation
                        .plies
                        .last_mut()
                        .ok_or(MovetextError::NagWithoutMove(nag))?;
                    ply.nags.push(nag);
                }

                TokenKind::Comment => match variation.plies.last_mut() {
                    Some(ply) => ply.comment.push_str(token.text),
                    None => variation.comment.push_str(token.text),
                },

                TokenKind::LeftParen => {
                    let index = last_index.ok_or(MovetextError::VariationWithoutMove)?;
                    if depth >= self.options.max_variation_depth {
                        return Err(MovetextError::NestingTooDeep {
                            limit: self.options.max_variation_depth,
                        });
                    }

                    trace!(depth = depth + 1, %index, "entering variation");
                    let mut alternative = Variation::default();
                    self.parse_plies(&mut alternative, depth + 1, index)
                        .map_err(|err| MovetextError::Variation(Box::new(err)))?;
                    trace!(depth = depth + 1, plies = alternative.plies.len(), "leaving variation");

                    if let Some(ply) = variation.plies.last_mut() {
                        ply.variations.push(alternative);
                    }
                }

                TokenKind::Period
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
                | TokenKind::LeftAngle
                | TokenKind::RightAngle
                | TokenKind::String
                | TokenKind::Unknown => {
                    return Err(MovetextError::UnexpectedToken {
                        kind: token.kind,
                        text: token.text.to_owned(),
                    });
                }
            }
        }
    }

    /// Consume the periods after a move number. One period (or none) means
    /// white moves next, an ellipsis means black.
    fn read_move_number(&mut self, text: &str) -> MovetextResult<PlyIndex> {
        let number = text
            .parse::<u16>()
            .map_err(|_| MovetextError::InvalidMoveNumber(text.to_owned()))?;

        let mut periods = 0usize;
        loop {
            let token = self.advance();
            if token.kind == TokenKind::Period {
                periods += 1;
            } else {
                self.pending = Some(token);
                break;
            }
        }

        Ok(PlyIndex::new(number, Color::from_white(periods <= 1)))
    }
}

/// Validate one move token and split off its annotation suffix.
fn read_move(text: &str) -> MovetextResult<Ply> {
    if text == NULL_MOVE_SAN {
        return Ok(Ply::new(text));
    }
    if !MOVETEXT_SAN.is_match(text) {
        return Err(MovetextError::InvalidSan(text.to_owned()));
    }

    for (suffix, nag) in MOVE_SUFFIX_NAGS {
        if let Some(san) = text.strip_suffix(suffix) {
            let mut ply = Ply::new(san);
            ply.nags.push(nag);
            return Ok(ply);
        }
    }

    Ok(Ply::new(text))
}

//! Movetext lexer.
//!
//! The tokenizer never fails: anything it cannot classify comes back as a
//! one-character [`TokenKind::Unknown`] token and the parser decides what to
//! do with it. Every call on non-empty input consumes at least one byte.

/// Lexical category of a movetext token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Period,
    Asterisk,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftAngle,
    RightAngle,
    Nag,
    Result,
    String,
    Symbol,
    Integer,
    Identifier,
    Comment,
    Unknown,
}

/// One token, borrowing its text from the movetext being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Payload: comment and string bodies come without their delimiters,
    /// a NAG without its `$`.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    #[inline]
    const fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

const RESULT_TOKENS: [&str; 3] = ["1-0", "0-1", "1/2-1/2"];

#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    pub fn new(movetext: &'a str) -> Self {
        Self { rest: movetext }
    }

    /// Input not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        self.rest
    }

    pub fn next_token(&mut self) -> Token<'a> {
        self.rest = self
            .rest
            .trim_start_matches([' ', '\t', '\n', '\r', '\x0b']);

        let Some(first) = self.rest.chars().next() else {
            return Token::new(TokenKind::Eof, "");
        };

        match first {
            ';' => return self.delimited(TokenKind::Comment, '\n'),
            '{' => return self.delimited(TokenKind::Comment, '}'),
            '"' => return self.string(),
            _ => {}
        }

        if let Some(result) = RESULT_TOKENS.iter().find(|r| self.rest.starts_with(*r)) {
            let text = self.take(result.len());
            return Token::new(TokenKind::Result, text);
        }

        let single = match first {
            '.' => Some(TokenKind::Period),
            '*' => Some(TokenKind::Asterisk),
            '[' => Some(TokenKind::LeftBracket),
            ']' => Some(TokenKind::RightBracket),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            '<' => Some(TokenKind::LeftAngle),
            '>' => Some(TokenKind::RightAngle),
            _ => None,
        };
        if let Some(kind) = single {
            let text = self.take(1);
            return Token::new(kind, text);
        }

        if first == '$' {
            return self.nag();
        }

        self.symbol_run()
    }

    /// Split off the first `len` bytes of the remaining input.
    fn take(&mut self, len: usize) -> &'a str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }

    /// Comment body up to `close`; an unterminated comment runs to the end.
    fn delimited(&mut self, kind: TokenKind, close: char) -> Token<'a> {
        let body = &self.rest[1..];
        match body.find(close) {
            Some(end) => {
                self.rest = &body[end + close.len_utf8()..];
                Token::new(kind, &body[..end])
            }
            None => {
                self.rest = "";
                Token::new(kind, body)
            }
        }
    }

    /// Quoted string; a backslash escapes the next character.
    fn string(&mut self) -> Token<'a> {
        let body = &self.rest[1..];
        let mut escaped = false;

        for (pos, ch) in body.char_indices() {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                self.rest = &body[pos + 1..];
                return Token::new(TokenKind::String, &body[..pos]);
            }
        }

        self.rest = "";
        Token::new(TokenKind::String, body)
    }

    fn nag(&mut self) -> Token<'a> {
        let digits = self.rest[1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let text = &self.rest[1..1 + digits];
        self.rest = &self.rest[1 + digits..];

        Token::new(TokenKind::Nag, if text.is_empty() { "0" } else { text })
    }

    /// Maximal run of digits, letters, `_` and `+#=:-`, with any trailing
    /// `!`/`?` annotation absorbed into a non-empty run.
    fn symbol_run(&mut self) -> Token<'a> {
        let bytes = self.rest.as_bytes();
        let (mut has_symbol, mut has_letter) = (false, false);
        let mut end = 0;

        while let Some(&c) = bytes.get(end) {
            match c {
                b'0'..=b'9' => {}
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => has_letter = true,
                b'+' | b'#' | b'=' | b':' | b'-' => has_symbol = true,
                _ => break,
            }
            end += 1;
        }

        if end == 0 {
            let width = self.rest.chars().next().map_or(1, char::len_utf8);
            let text = self.take(width);
            return Token::new(TokenKind::Unknown, text);
        }

        let suffix = bytes[end..]
            .iter()
            .take_while(|&&c| c == b'!' || c == b'?')
            .count();
        let annotated = suffix > 0;
        let text = self.take(end + suffix);

        let kind = if has_symbol || annotated {
            TokenKind::Symbol
        } else if has_letter {
            TokenKind::Identifier
        } else {
            TokenKind::Integer
        };
        Token::new(kind, text)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to, not including, end of input.
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

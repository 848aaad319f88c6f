//! Module `scanner` implements the one‑pass lexer for SIMPL.
//!
//! It splits one line of source text into a flat, left‑to‑right sequence of
//! [`Token`]s.  Lexing never fails: whitespace, comments and any byte that
//! does not start a token are silently skipped.
//!
//! # Token Recognition (priority order)
//!
//! 1. **Comments**: `#` to end of line, discarded entirely.
//! 2. **Operators**: `-`, `+`, `*`, `/`, `%`, `=`, `!`, each optionally
//!    followed by `=` (`+=`, `==`, `!=`, …).
//! 3. **Range / member punctuation**: `..` and `.`.
//! 4. **Grouping / separators**: `(`, `)`, `[`, `]`, `,`.
//! 5. **Strings**: `"` … `"`, where a doubled quote `""` is part of the
//!    string and not a terminator.  An opening quote that no terminator
//!    matches is dropped.
//! 6. **Numbers**: a run of ASCII digits.
//! 7. **Words**: `[A-Za-z0-9_]+`, resolved against a perfect‑hash `KEYWORDS`
//!    map; anything else is an `IDENTIFIER`.
//!
//! # Example
//!
//! ```rust
//! use simpl::scanner::tokenize;
//!
//! let lexemes: Vec<&str> = tokenize("x += 2 # bump")
//!     .iter()
//!     .map(|t| t.lexeme)
//!     .collect();
//! assert_eq!(lexemes, ["x", "+=", "2"]);
//! ```

use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"do"       => TokenType::DO,
    b"end"      => TokenType::END,
    b"false"    => TokenType::FALSE,
    b"function" => TokenType::FUNCTION,
    b"true"     => TokenType::TRUE,
};

/// Lex `text` into its token sequence.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let tokens: Vec<Token<'_>> = Scanner::new(text).collect();

    info!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());

    tokens
}

/// A single pass **scanner** over one submitted line (or several lines of a
/// pending block joined with `\n`).  Every token's lexeme borrows from the
/// source text.
pub struct Scanner<'a> {
    src: &'a str,
    start: usize, // index of the first byte of the current lexeme
    curr: usize,  // index one past the last byte examined
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(src: &'a str) -> Self {
        debug!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte; `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes().get(self.curr).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan from `self.curr`, returning the kind of the token that starts
    /// there, or `None` when the bytes consumed produce no token.
    fn scan_token(&mut self) -> Option<TokenType> {
        let b = self.advance();

        match b {
            b'#' => {
                match memchr(b'\n', &self.bytes()[self.curr..]) {
                    Some(pos) => self.curr += pos,
                    None => self.curr = self.src.len(),
                }

                None
            }

            b'-' | b'+' | b'*' | b'/' | b'%' | b'=' | b'!' => {
                self.match_byte(b'=');

                Some(TokenType::OPERATOR)
            }

            b'.' => {
                if self.match_byte(b'.') {
                    Some(TokenType::DOT_DOT)
                } else {
                    Some(TokenType::DOT)
                }
            }

            b'(' => Some(TokenType::LEFT_PAREN),
            b')' => Some(TokenType::RIGHT_PAREN),
            b'[' => Some(TokenType::LEFT_BRACKET),
            b']' => Some(TokenType::RIGHT_BRACKET),
            b',' => Some(TokenType::COMMA),

            b'"' => self.scan_string(),

            b'0'..=b'9' => {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }

                Some(TokenType::NUMBER)
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while is_word_byte(self.peek()) {
                    self.advance();
                }

                let slice: &[u8] = &self.bytes()[self.start..self.curr];

                Some(KEYWORDS.get(slice).copied().unwrap_or(TokenType::IDENTIFIER))
            }

            // Whitespace and anything unrecognised.
            _ => {
                debug!("Skipping byte {:#04x}", b);

                None
            }
        }
    }

    /// Scan a string whose opening quote was just consumed.
    ///
    /// The lexeme is the *longest* prefix of the form `"(text|"")*"`.  Every
    /// quote met between items could close the string; when it is followed by
    /// another quote it may also be a doubled quote, so scanning carries on
    /// and falls back to the last possible closer if the input runs out.
    fn scan_string(&mut self) -> Option<TokenType> {
        let mut last_close: Option<usize> = None;

        loop {
            match memchr(b'"', &self.bytes()[self.curr..]) {
                None => break,

                Some(pos) => {
                    let quote: usize = self.curr + pos;
                    last_close = Some(quote);

                    if self.bytes().get(quote + 1) == Some(&b'"') {
                        self.curr = quote + 2;
                    } else {
                        self.curr = quote + 1;

                        return Some(TokenType::STRING);
                    }
                }
            }
        }

        match last_close {
            Some(quote) => {
                self.curr = quote + 1;

                Some(TokenType::STRING)
            }

            None => {
                // Unterminated: drop the opening quote and lex what follows.
                debug!("Dropping unterminated quote at {}", self.start);

                self.curr = self.start + 1;

                None
            }
        }
    }
}

#[inline(always)]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_at_end() {
            self.start = self.curr;

            if let Some(tt) = self.scan_token() {
                let lexeme: &'a str = &self.src[self.start..self.curr];

                return Some(Token::new(tt, lexeme));
            }
        }

        None
    }
}

impl FusedIterator for Scanner<'_> {}

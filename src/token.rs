use log::debug;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The different kinds of tokens recognised by the SIMPL scanner.
///
/// A token is just a lexeme; its kind is inferred from the text shape when
/// it is scanned.  Operators (`+`, `*=`, `==`, …) share one `OPERATOR` kind
/// and are told apart by lexeme.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    /// A run of ASCII digits
    NUMBER,

    /// A double‑quoted string, quotes included in the lexeme
    STRING,

    /// A user‑defined name
    IDENTIFIER,

    /// `[-+*/%=!]` optionally followed by `=`
    OPERATOR,

    /// '.'
    DOT,

    /// '..'
    DOT_DOT,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '['
    LEFT_BRACKET,

    /// ']'
    RIGHT_BRACKET,

    /// ','
    COMMA,

    /// 'do'
    DO,

    /// 'end'
    END,

    /// 'function'
    FUNCTION,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,
}

impl TokenType {
    fn name(self) -> &'static str {
        match self {
            TokenType::NUMBER => "NUMBER",
            TokenType::STRING => "STRING",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::OPERATOR => "OPERATOR",
            TokenType::DOT => "DOT",
            TokenType::DOT_DOT => "DOT_DOT",
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACKET => "LEFT_BRACKET",
            TokenType::RIGHT_BRACKET => "RIGHT_BRACKET",
            TokenType::COMMA => "COMMA",
            TokenType::DO => "DO",
            TokenType::END => "END",
            TokenType::FUNCTION => "FUNCTION",
            TokenType::TRUE => "TRUE",
            TokenType::FALSE => "FALSE",
        }
    }
}

/// A scanned token: its inferred kind and the exact source slice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, lexeme: &'a str) -> Self {
        debug!("Creating new token: type={:?}, lexeme={}", token_type, lexeme);

        Self { token_type, lexeme }
    }

    /// Contents of a `STRING` token with the quotes stripped and every
    /// doubled quote (`""`) collapsed into one literal quote.
    pub fn string_value(&self) -> Cow<'a, str> {
        let inner: &'a str = self
            .lexeme
            .get(1..self.lexeme.len().saturating_sub(1))
            .unwrap_or("");

        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal: Cow<'_, str> = match self.token_type {
            TokenType::STRING => self.string_value(),
            TokenType::NUMBER => Cow::Borrowed(self.lexeme),
            _ => Cow::Borrowed("null"),
        };

        write!(f, "{} {} {}", self.token_type.name(), self.lexeme, literal)
    }
}

//! Lexer errors.

use std::fmt;

use lode_ir::Span;

/// Structured error kind for programmatic matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar,
    UnterminatedString,
    BadEscape,
    IntOutOfRange,
}

/// An error encountered while lexing a unit.
#[derive(Debug, Clone)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn unexpected(slice: &str, span: Span) -> Self {
        let shown = slice.chars().next().map(String::from).unwrap_or_default();
        LexError {
            kind: LexErrorKind::UnexpectedChar,
            message: format!("unexpected character '{shown}'"),
            span,
        }
    }

    pub fn unterminated_string(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            message: "unterminated string literal".to_string(),
            span,
        }
    }

    pub fn bad_escape(escape: Option<char>, span: Span) -> Self {
        let message = match escape {
            Some(c) => format!("unknown escape sequence '\\{c}'"),
            None => "string literal ends with a bare '\\'".to_string(),
        };
        LexError {
            kind: LexErrorKind::BadEscape,
            message,
            span,
        }
    }

    pub fn int_out_of_range(slice: &str, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::IntOutOfRange,
            message: format!("integer literal '{slice}' does not fit in 64 bits"),
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

//! Lexer for lode source units, built on logos.
//!
//! Raw logos tokens are cooked into [`Token`]s with interned identifier and
//! string contents. Horizontal whitespace and `//` comments are skipped;
//! newlines are real tokens because they separate statements.

mod error;

pub use error::{LexError, LexErrorKind};

use logos::Logos;
use lode_ir::{Interner, Span, Token, TokenKind, TokenList};

/// Raw token shapes recognized by logos, before interning and cooking.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[token("use")]
    Use,
    #[token("as")]
    As,
    #[token("let")]
    Let,
    #[token("fn")]
    Fn,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Assign,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Lex one unit's source text into a token list.
pub fn lex(source: &str, interner: &Interner) -> Result<TokenList, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start as u32, range.end as u32);
        let slice = lexer.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                // An unterminated string reaches here as a lone `"` followed
                // by whatever logos could not match.
                if slice.starts_with('"') {
                    return Err(LexError::unterminated_string(span));
                }
                return Err(LexError::unexpected(slice, span));
            }
        };

        let kind = match raw {
            RawToken::Newline => TokenKind::Newline,
            RawToken::Use => TokenKind::Use,
            RawToken::As => TokenKind::As,
            RawToken::Let => TokenKind::Let,
            RawToken::Fn => TokenKind::Fn,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::Return => TokenKind::Return,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Assign => TokenKind::Assign,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Int => {
                let digits: String = slice.chars().filter(|&c| c != '_').collect();
                let value: i64 = digits
                    .parse()
                    .map_err(|_| LexError::int_out_of_range(slice, span))?;
                TokenKind::Int(value)
            }
            RawToken::Str => {
                let inner = &slice[1..slice.len() - 1];
                let cooked = cook_string(inner, span)?;
                TokenKind::Str(interner.intern(&cooked))
            }
            RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        };

        tokens.push(Token::new(kind, span));
    }

    let eof = source.len() as u32;
    Ok(TokenList::new(tokens, Span::new(eof, eof)))
}

/// Resolve escape sequences in a string literal's interior.
fn cook_string(raw: &str, span: Span) -> Result<String, LexError> {
    let mut cooked = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            cooked.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => cooked.push('\n'),
            Some('t') => cooked.push('\t'),
            Some('\\') => cooked.push('\\'),
            Some('"') => cooked.push('"'),
            other => {
                return Err(LexError::bad_escape(other, span));
            }
        }
    }
    Ok(cooked)
}

#[cfg(test)]
mod tests;

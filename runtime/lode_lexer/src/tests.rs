use pretty_assertions::assert_eq;

use super::*;
use lode_ir::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = Interner::new();
    lex(source, &interner)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_lex_keywords_and_idents() {
    let interner = Interner::new();
    let tokens = lex("use grouped.math as gm", &interner).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Use,
            TokenKind::Ident(interner.intern("grouped")),
            TokenKind::Dot,
            TokenKind::Ident(interner.intern("math")),
            TokenKind::As,
            TokenKind::Ident(interner.intern("gm")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_string_with_escapes() {
    let interner = Interner::new();
    let tokens = lex(r#""line\n\"quoted\"""#, &interner).unwrap();
    match tokens.get(0).kind {
        TokenKind::Str(name) => assert_eq!(interner.lookup(name), "line\n\"quoted\""),
        other => panic!("expected string token, got {other:?}"),
    }
}

#[test]
fn test_lex_int_with_underscores() {
    assert_eq!(kinds("1_000")[0], TokenKind::Int(1000));
}

#[test]
fn test_lex_skips_comments_keeps_newlines() {
    let interner = Interner::new();
    let tokens = lex("let x = 1 // trailing\nprint(x)", &interner).unwrap();
    let got: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Let,
            TokenKind::Ident(interner.intern("x")),
            TokenKind::Assign,
            TokenKind::Int(1),
            TokenKind::Newline,
            TokenKind::Ident(interner.intern("print")),
            TokenKind::LParen,
            TokenKind::Ident(interner.intern("x")),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_two_char_operators() {
    let got = kinds("== != <= >= && ||");
    assert_eq!(
        got,
        vec![
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AndAnd,
            TokenKind::OrOr,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_unexpected_char() {
    let interner = Interner::new();
    let err = lex("let @ = 1", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar);
}

#[test]
fn test_lex_unterminated_string() {
    let interner = Interner::new();
    let err = lex("\"never closed", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn test_lex_bad_escape() {
    let interner = Interner::new();
    let err = lex(r#""bad \q escape""#, &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::BadEscape);
}

#[test]
fn test_lex_int_out_of_range() {
    let interner = Interner::new();
    let err = lex("99999999999999999999", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IntOutOfRange);
}

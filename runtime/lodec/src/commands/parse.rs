//! The `parse` command: front-end check for a single unit file.

use std::fs;

use lode_diagnostic::{Diagnostic, ErrorCode};
use lode_ir::SharedInterner;

use super::emit;

/// Lex and parse one file, reporting errors without executing anything.
pub fn parse_file(path: &str) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            return 1;
        }
    };

    let interner = SharedInterner::new();
    let tokens = match lode_lexer::lex(&source, &interner) {
        Ok(tokens) => tokens,
        Err(err) => {
            emit(
                &Diagnostic::error(ErrorCode::E0101)
                    .with_message(format!("{path}: {err}"))
                    .with_note(format!("at bytes {}", err.span)),
            );
            return 1;
        }
    };

    match lode_parse::parse(&tokens, &interner) {
        Ok(unit) => {
            println!("{path}: ok, {} top-level statement(s)", unit.stmts.len());
            0
        }
        Err(err) => {
            emit(
                &Diagnostic::error(ErrorCode::E0102)
                    .with_message(format!("{path}: {err}"))
                    .with_note(format!("at bytes {}", err.span)),
            );
            1
        }
    }
}

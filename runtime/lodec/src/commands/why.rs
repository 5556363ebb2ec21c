//! The `why` command: explain what a unit name resolves to.
//!
//! Shadowing is silent at resolve time — the earlier search path entry just
//! wins. This command is the explicit surface: it lists every match for a
//! name in priority order and marks the winner.

use std::path::PathBuf;

use lode_diagnostic::{Diagnostic, ErrorCode};
use lode_ir::{SharedInterner, UnitName};
use lode_resolve::UnitKind;

use super::emit;
use crate::search::assemble_search_path;

pub fn why_unit(target: &str, extra_paths: &[PathBuf]) -> i32 {
    let interner = SharedInterner::new();
    let search = assemble_search_path(extra_paths);

    let name = match UnitName::parse(target, &interner) {
        Ok(name) => name,
        Err(err) => {
            emit(&Diagnostic::error(ErrorCode::E1102).with_message(err.to_string()));
            return 1;
        }
    };

    let found = search.matches(&name, &interner);
    match found.as_slice() {
        [] => {
            // Resolve again purely for the probed-path list in the error.
            match search.resolve(&name, &interner) {
                Err(err) => {
                    let mut diag =
                        Diagnostic::error(ErrorCode::E1101).with_message(err.to_string());
                    for path in &err.searched {
                        diag = diag.with_note(format!("searched {}", path.display()));
                    }
                    emit(&diag);
                }
                Ok(_) => unreachable!("matches() was empty"),
            }
            1
        }
        [only] => {
            println!(
                "{} -> {} ({})",
                target,
                only.path.display(),
                kind_label(only.kind)
            );
            0
        }
        [winner, shadowed @ ..] => {
            let mut diag = Diagnostic::warning(ErrorCode::E1103)
                .with_message(format!(
                    "unit '{}' has {} matches on the search path",
                    target,
                    found.len()
                ))
                .with_note(format!(
                    "winner: {} ({})",
                    winner.path.display(),
                    kind_label(winner.kind)
                ));
            for loser in shadowed {
                diag = diag.with_note(format!(
                    "shadowed: {} ({})",
                    loser.path.display(),
                    kind_label(loser.kind)
                ));
            }
            emit(&diag);
            0
        }
    }
}

fn kind_label(kind: UnitKind) -> &'static str {
    match kind {
        UnitKind::File => "file unit",
        UnitKind::Group => "group unit",
    }
}

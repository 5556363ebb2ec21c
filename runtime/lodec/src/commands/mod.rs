//! CLI commands.
//!
//! Each command returns the process exit code instead of exiting, so the
//! binary stays a thin dispatcher and tests can call commands directly.

mod parse;
mod run;
mod why;

pub use parse::parse_file;
pub use run::run_unit;
pub use why::why_unit;

use std::path::PathBuf;

use lode_diagnostic::{Diagnostic, ErrorCode};
use lode_eval::{EvalError, EvalErrorKind};

/// Split command arguments into one positional target and repeated
/// `--path <dir>` options.
pub fn parse_target_and_paths(args: &[String]) -> Result<(String, Vec<PathBuf>), String> {
    let mut target = None;
    let mut paths = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--path" => {
                let Some(dir) = args.get(i + 1) else {
                    return Err("--path requires a directory".to_string());
                };
                paths.push(PathBuf::from(dir));
                i += 2;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{flag}'"));
            }
            positional => {
                if target.is_some() {
                    return Err(format!("unexpected extra argument '{positional}'"));
                }
                target = Some(positional.to_string());
                i += 1;
            }
        }
    }

    match target {
        Some(target) => Ok((target, paths)),
        None => Err("missing unit name or file".to_string()),
    }
}

/// Map a loader error onto a renderable diagnostic.
pub fn eval_error_diagnostic(err: &EvalError) -> Diagnostic {
    match &err.kind {
        EvalErrorKind::UnitNotFound { searched, .. } => {
            let mut diag = Diagnostic::error(ErrorCode::E1101).with_message(err.message.clone());
            for path in searched {
                diag = diag.with_note(format!("searched {}", path.display()));
            }
            diag
        }
        _ => {
            let mut diag = Diagnostic::error(ErrorCode::E2101).with_message(err.message.clone());
            if let Some(span) = err.span {
                diag = diag.with_note(format!("at bytes {span}"));
            }
            diag
        }
    }
}

/// Render one diagnostic to stderr.
pub(crate) fn emit(diag: &Diagnostic) {
    let mut emitter = lode_diagnostic::emitter::TerminalEmitter::new(std::io::stderr());
    emitter.emit(diag);
    emitter.flush();
}

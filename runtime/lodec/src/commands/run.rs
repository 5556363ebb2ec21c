//! The `run` command: load and execute a unit as the process entry point.

use std::path::{Path, PathBuf};

use lode_diagnostic::{Diagnostic, ErrorCode};
use lode_eval::Loader;
use lode_ir::{SharedInterner, UnitName};

use super::{emit, eval_error_diagnostic};
use crate::search::assemble_search_path;

/// Run a unit as the entry point.
///
/// `target` is either a bare unit name resolved on the search path, or a
/// path to a `.lode` file — in which case the file's directory leads the
/// search path and the file stem is the entry name, so sibling units import
/// with bare names.
pub fn run_unit(target: &str, extra_paths: &[PathBuf]) -> i32 {
    let interner = SharedInterner::new();
    let mut search = assemble_search_path(extra_paths);

    let entry = if target.ends_with(".lode") {
        let file = Path::new(target);
        let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
            emit(
                &Diagnostic::error(ErrorCode::E1102)
                    .with_message(format!("cannot derive a unit name from '{target}'")),
            );
            return 1;
        };
        let dir = match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        search.prepend_root(dir);
        UnitName::parse(stem, &interner)
    } else {
        UnitName::parse(target, &interner)
    };

    let entry = match entry {
        Ok(entry) => entry,
        Err(err) => {
            emit(&Diagnostic::error(ErrorCode::E1102).with_message(err.to_string()));
            return 1;
        }
    };

    let mut loader = Loader::new(search, interner);
    match loader.invoke_entry(&entry) {
        Ok(status) => status.code(),
        Err(err) => {
            emit(&eval_error_diagnostic(&err));
            1
        }
    }
}

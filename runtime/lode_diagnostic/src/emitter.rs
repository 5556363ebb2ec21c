//! Terminal rendering for diagnostics.

use std::io::Write;

use crate::Diagnostic;

/// Renders diagnostics to a writer, one per block:
///
/// ```text
/// error[E1101]: unit 'doesnotexist' not found on the search path
///   note: searched /proj/doesnotexist.lode
///   note: searched /proj/doesnotexist/mod.lode
/// ```
pub struct TerminalEmitter<W: Write> {
    out: W,
    emitted: usize,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(out: W) -> Self {
        TerminalEmitter { out, emitted: 0 }
    }

    /// Render one diagnostic. Write failures to the sink are ignored — the
    /// process is already on an error path when this runs.
    pub fn emit(&mut self, diag: &Diagnostic) {
        let _ = writeln!(
            self.out,
            "{}[{}]: {}",
            diag.severity, diag.code, diag.message
        );
        for note in &diag.notes {
            let _ = writeln!(self.out, "  note: {note}");
        }
        self.emitted += 1;
    }

    /// Number of diagnostics emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, ErrorCode};

    #[test]
    fn test_emit_renders_code_and_notes() {
        let mut buf = Vec::new();
        let mut emitter = TerminalEmitter::new(&mut buf);
        emitter.emit(
            &Diagnostic::warning(ErrorCode::E1103)
                .with_message("unit 'math' has 2 matches on the search path")
                .with_note("winner: /proj/math.lode")
                .with_note("shadowed: /lib/math.lode"),
        );
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("warning[E1103]: "));
        assert!(text.contains("  note: shadowed: /lib/math.lode"));
    }
}

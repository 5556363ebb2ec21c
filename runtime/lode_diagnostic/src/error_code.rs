//! Stable, searchable diagnostic codes.

use std::fmt;

/// Diagnostic code.
///
/// Codes are stable across releases so users can search for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Lexical error in a unit's source text.
    E0101,
    /// Syntax error in a unit's source text.
    E0102,
    /// Unit not found on the search path.
    E1101,
    /// Invalid unit name.
    E1102,
    /// Unit name shadowed by an earlier search path entry.
    E1103,
    /// Runtime error during unit execution.
    E2101,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E1101 => "E1101",
            ErrorCode::E1102 => "E1102",
            ErrorCode::E1103 => "E1103",
            ErrorCode::E2101 => "E2101",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

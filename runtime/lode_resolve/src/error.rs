//! Resolution errors.

use std::fmt;
use std::path::PathBuf;

/// The requested name matched no unit on the search path.
///
/// Resolution has exactly one failure mode; shadowing and circularity are
/// deliberately not errors. Carries every path probed so the host can render
/// a complete report.
#[derive(Debug, Clone)]
pub struct UnitNotFound {
    /// Dotted unit name as the user wrote it.
    pub name: String,
    /// Every candidate path probed, in probe order.
    pub searched: Vec<PathBuf>,
}

impl fmt::Display for UnitNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit '{}' not found on the search path", self.name)
    }
}

impl std::error::Error for UnitNotFound {}

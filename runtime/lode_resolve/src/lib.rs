//! Search path resolution for lode units.
//!
//! A unit name is resolved against an ordered list of root directories. For
//! each root, the name `a.b` expands to two candidate paths, probed in
//! order:
//!
//! 1. `<root>/a/b.lode` — a file unit
//! 2. `<root>/a/b/mod.lode` — a group unit (directory with marker file)
//!
//! The first candidate that exists wins. Earlier roots beat later roots,
//! which is the documented source of name shadowing: a same-named unit at a
//! later root is silently unreachable under the bare name. [`SearchPath::matches`]
//! exists so hosts can surface that explicitly instead of discovering it
//! through a missing member at the point of use.

mod error;
mod search_path;

pub use error::UnitNotFound;
pub use search_path::{ResolvedUnit, SearchPath, UnitKind, UnitMatch};

/// File extension for unit sources.
pub const UNIT_EXT: &str = "lode";

/// Marker file naming a directory as a group unit.
pub const GROUP_MARKER: &str = "mod.lode";

#[cfg(test)]
mod tests;

//! The search path and its probing logic.

use std::path::{Path, PathBuf};

use lode_ir::{Interner, UnitName};

use crate::error::UnitNotFound;
use crate::{GROUP_MARKER, UNIT_EXT};

/// Whether a resolved unit is a single file or a marked directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    File,
    Group,
}

/// A successfully resolved unit.
#[derive(Debug, Clone)]
pub struct ResolvedUnit {
    pub name: UnitName,
    /// The group containing this unit. For a group unit, the name itself;
    /// for a top-level file unit, `None`.
    pub package: Option<UnitName>,
    /// Path of the source file to execute (for a group, its marker file).
    pub path: PathBuf,
    pub kind: UnitKind,
}

/// One existing candidate for a name, in search priority order.
#[derive(Debug, Clone)]
pub struct UnitMatch {
    pub path: PathBuf,
    pub root: PathBuf,
    pub kind: UnitKind,
}

/// Ordered list of root directories consulted to resolve a unit name.
///
/// First match wins. The hosting environment decides what goes in here and
/// in what order; the resolver only consumes it.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    roots: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        SearchPath { roots: Vec::new() }
    }

    pub fn from_roots(roots: Vec<PathBuf>) -> Self {
        SearchPath { roots }
    }

    /// Append a root with lowest priority.
    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Insert a root with highest priority.
    pub fn prepend_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.insert(0, root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Candidate paths for `segments` under `root`: file unit first, then
    /// group unit.
    fn candidates(root: &Path, segments: &[&str]) -> [(PathBuf, UnitKind); 2] {
        let mut dir = root.to_path_buf();
        for segment in &segments[..segments.len() - 1] {
            dir.push(segment);
        }
        let last = segments[segments.len() - 1];

        let file = dir.join(format!("{last}.{UNIT_EXT}"));
        let group = dir.join(last).join(GROUP_MARKER);
        [(file, UnitKind::File), (group, UnitKind::Group)]
    }

    /// Every existing candidate for `name` across the whole search path, in
    /// priority order. Empty when the name does not resolve.
    pub fn matches(&self, name: &UnitName, interner: &Interner) -> Vec<UnitMatch> {
        let segments: Vec<&str> = name.segments().iter().map(|&s| interner.lookup(s)).collect();

        let mut found = Vec::new();
        for root in &self.roots {
            for (path, kind) in Self::candidates(root, &segments) {
                tracing::debug!(path = %path.display(), "probing candidate");
                if path.is_file() {
                    found.push(UnitMatch {
                        path,
                        root: root.clone(),
                        kind,
                    });
                }
            }
        }
        found
    }

    /// Resolve `name` to the winning unit.
    ///
    /// Probes every root so shadowing can be reported, then takes the first
    /// match. Additional matches are logged, never errors: the earlier
    /// location silently wins, and `matches` is the explicit surface for
    /// inspecting the losers.
    pub fn resolve(
        &self,
        name: &UnitName,
        interner: &Interner,
    ) -> Result<ResolvedUnit, UnitNotFound> {
        let display_name = name.display(interner);
        let found = self.matches(name, interner);

        let Some(winner) = found.first() else {
            let segments: Vec<&str> =
                name.segments().iter().map(|&s| interner.lookup(s)).collect();
            let searched = self
                .roots
                .iter()
                .flat_map(|root| Self::candidates(root, &segments))
                .map(|(path, _)| path)
                .collect();
            return Err(UnitNotFound {
                name: display_name,
                searched,
            });
        };

        if found.len() > 1 {
            tracing::warn!(
                name = %display_name,
                winner = %winner.path.display(),
                shadowed = found.len() - 1,
                "unit name has multiple search path matches"
            );
        }

        let package = match winner.kind {
            UnitKind::Group => Some(name.clone()),
            UnitKind::File => name.parent(),
        };

        tracing::debug!(name = %display_name, path = %winner.path.display(), "resolved unit");

        Ok(ResolvedUnit {
            name: name.clone(),
            package,
            path: winner.path.clone(),
            kind: winner.kind,
        })
    }
}

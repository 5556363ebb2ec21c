//! Dotted unit names.

use std::fmt;

use super::{Interner, Name};

/// A resolved, absolute unit name: one or more dot-separated segments.
///
/// `math` names a top-level unit; `grouped.math` names the unit `math`
/// inside the group `grouped`. Never empty, never relative. The segments are
/// interned, so a `UnitName` is cheap to clone, hash and compare — it is the
/// key type of the unit cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitName(Vec<Name>);

/// Error returned when parsing user input into a [`UnitName`] fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUnitName {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for InvalidUnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid unit name '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidUnitName {}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl UnitName {
    /// Build from already-interned segments. Panics on empty input in debug
    /// builds; callers construct segments from parsed source, which cannot
    /// produce an empty path.
    pub fn from_segments(segments: Vec<Name>) -> Self {
        debug_assert!(!segments.is_empty());
        UnitName(segments)
    }

    pub fn from_single(segment: Name) -> Self {
        UnitName(vec![segment])
    }

    /// Parse user input (`grouped.math`) into a unit name, validating each
    /// segment against the identifier grammar.
    pub fn parse(input: &str, interner: &Interner) -> Result<Self, InvalidUnitName> {
        if input.is_empty() {
            return Err(InvalidUnitName {
                input: input.to_string(),
                reason: "name is empty",
            });
        }

        let mut segments = Vec::new();
        for segment in input.split('.') {
            if !is_valid_segment(segment) {
                return Err(InvalidUnitName {
                    input: input.to_string(),
                    reason: "segments must be identifiers separated by '.'",
                });
            }
            segments.push(interner.intern(segment));
        }
        Ok(UnitName(segments))
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    /// Final segment: the name a bare `use` binds the namespace under.
    pub fn tail(&self) -> Name {
        *self.0.last().unwrap_or(&Name::EMPTY)
    }

    /// The containing group, or `None` for a top-level name.
    pub fn parent(&self) -> Option<UnitName> {
        if self.0.len() < 2 {
            return None;
        }
        Some(UnitName(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Append a segment, producing the name of a nested unit.
    pub fn join(&self, segment: Name) -> UnitName {
        let mut segments = self.0.clone();
        segments.push(segment);
        UnitName(segments)
    }

    /// All proper prefixes, shortest first: for `a.b.c`, yields `a`, `a.b`.
    ///
    /// These are the groups that must be loaded before the unit itself.
    pub fn prefixes(&self) -> Vec<UnitName> {
        (1..self.0.len())
            .map(|len| UnitName(self.0[..len].to_vec()))
            .collect()
    }

    /// Render as dotted text.
    pub fn display(&self, interner: &Interner) -> String {
        let parts: Vec<&str> = self.0.iter().map(|&s| interner.lookup(s)).collect();
        parts.join(".")
    }
}

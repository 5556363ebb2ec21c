//! The process-wide unit cache.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use lode_ir::UnitName;

use crate::namespace::NamespaceRef;

/// Record of one loaded unit.
///
/// Created — empty — *before* the unit's top-level statements run, so
/// re-entrant resolution of the same name mid-execution observes the record
/// instead of recursing.
pub struct UnitRecord {
    pub name: UnitName,
    /// Source file this unit was loaded from.
    pub path: PathBuf,
    pub namespace: NamespaceRef,
}

impl UnitRecord {
    /// Whether the execution that populated this record was started
    /// directly.
    pub fn is_entry(&self) -> bool {
        self.namespace.is_entry()
    }
}

/// Map from unit name to its record.
///
/// A name appears at most once; re-resolving returns the cached record
/// without re-executing top-level statements. Entries are never evicted —
/// only [`UnitCache::reset`] (test isolation) or process exit clears them.
#[derive(Default)]
pub struct UnitCache {
    records: FxHashMap<UnitName, UnitRecord>,
}

impl UnitCache {
    pub fn new() -> Self {
        UnitCache {
            records: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &UnitName) -> Option<&UnitRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &UnitName) -> bool {
        self.records.contains_key(name)
    }

    pub fn insert(&mut self, record: UnitRecord) {
        self.records.insert(record.name.clone(), record);
    }

    /// Number of loaded units.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Exists for test isolation; production hosts load
    /// once and exit.
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

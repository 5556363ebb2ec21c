//! String interner backing [`Name`].
//!
//! A single `RwLock`-guarded table: the runtime resolves and executes units
//! sequentially, so there is no contention to shard away. Interned strings
//! are leaked — the interner lives for the whole process, exactly like the
//! unit cache it serves.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::ops::Deref;
use std::sync::Arc;

use super::Name;

struct InternerTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl InternerTable {
    fn with_empty() -> Self {
        let mut table = InternerTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        // Pre-intern the empty string at index 0 so Name::EMPTY is valid.
        table.map.insert("", Name::EMPTY);
        table.strings.push("");
        table
    }
}

/// Process-wide string interner.
///
/// `intern` is idempotent: the same string always yields the same [`Name`].
/// `lookup` returns `&'static str` because interned contents are never freed.
pub struct Interner {
    table: RwLock<InternerTable>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            table: RwLock::new(InternerTable::with_empty()),
        }
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Re-check under the write lock: another caller may have interned
        // `s` between our read and write acquisitions.
        if let Some(&name) = table.map.get(s) {
            return name;
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(u32::try_from(table.strings.len()).unwrap_or(u32::MAX));
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Look up the string for a previously interned `Name`.
    ///
    /// Returns the empty string for a `Name` this interner never produced.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true: the empty string is pre-interned.
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to an [`Interner`].
///
/// Cheap to clone; all clones observe the same table.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<Interner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(Interner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = Interner;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

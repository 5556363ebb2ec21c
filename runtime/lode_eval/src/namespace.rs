//! Unit namespaces.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lode_ir::{Name, UnitName};

use crate::value::Value;

/// A unit's namespace: its name, its entry flag, and its bindings.
///
/// The entry flag records how the execution that populated this namespace
/// was initiated: `true` only for the single unit started via
/// `invoke_entry`, `false` for every unit reached via `resolve`.
struct Namespace {
    name: UnitName,
    entry: bool,
    bindings: FxHashMap<Name, Value>,
}

/// Shared handle to a namespace.
///
/// Single-threaded by design (`Rc<RefCell<_>>`): execution is strictly
/// sequential, and sharing is what makes the cache contract observable —
/// every resolution of a unit yields a handle to the *same* namespace.
#[derive(Clone)]
pub struct NamespaceRef(Rc<RefCell<Namespace>>);

impl NamespaceRef {
    /// Create an empty namespace for a unit about to execute.
    pub fn new(name: UnitName, entry: bool) -> Self {
        NamespaceRef(Rc::new(RefCell::new(Namespace {
            name,
            entry,
            bindings: FxHashMap::default(),
        })))
    }

    pub fn unit_name(&self) -> UnitName {
        self.0.borrow().name.clone()
    }

    /// Whether the execution that populates this namespace was started
    /// directly rather than reached via import.
    pub fn is_entry(&self) -> bool {
        self.0.borrow().entry
    }

    /// Define or overwrite a binding.
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Look up a binding, cloning the value out.
    pub fn get(&self, name: Name) -> Option<Value> {
        self.0.borrow().bindings.get(&name).cloned()
    }

    /// Number of bindings currently defined.
    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().bindings.is_empty()
    }

    /// Identity comparison: do both handles point at the same namespace?
    pub fn same(&self, other: &NamespaceRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for NamespaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Namespace")
            .field("name", &inner.name)
            .field("entry", &inner.entry)
            .field("bindings", &inner.bindings.len())
            .finish()
    }
}

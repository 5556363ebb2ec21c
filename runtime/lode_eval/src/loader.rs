//! The loader: name in, namespace out, executed at most once.

use std::fs;
use std::rc::Rc;

use lode_ir::{SharedInterner, UnitName};
use lode_resolve::SearchPath;

use crate::builtins::Builtins;
use crate::cache::{UnitCache, UnitRecord};
use crate::errors::{self, EvalError};
use crate::interpreter::Env;
use crate::namespace::NamespaceRef;
use crate::print_handler::PrintHandler;
use crate::value::Value;

/// Outcome of [`Loader::invoke_entry`], mapped by hosts onto the process
/// exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    pub fn code(self) -> i32 {
        self.0
    }
}

/// Resolves unit names to namespaces, executing each unit at most once.
///
/// Owns the process-wide [`UnitCache`]. Execution is single-threaded and
/// synchronous: a unit's top-level statements run in order, and a `use`
/// statement re-enters the loader for the imported unit before the next
/// statement runs.
pub struct Loader {
    search_path: SearchPath,
    interner: SharedInterner,
    cache: UnitCache,
    printer: Rc<PrintHandler>,
    pub(crate) builtins: Builtins,
}

impl Loader {
    /// Loader printing to stdout.
    pub fn new(search_path: SearchPath, interner: SharedInterner) -> Self {
        Self::with_printer(search_path, interner, PrintHandler::stdout())
    }

    /// Loader with an explicit print destination (buffer capture in tests).
    pub fn with_printer(
        search_path: SearchPath,
        interner: SharedInterner,
        printer: PrintHandler,
    ) -> Self {
        let builtins = Builtins::new(&interner);
        Loader {
            search_path,
            interner,
            cache: UnitCache::new(),
            printer: Rc::new(printer),
            builtins,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    pub fn cache(&self) -> &UnitCache {
        &self.cache
    }

    pub fn printer(&self) -> &Rc<PrintHandler> {
        &self.printer
    }

    /// Clear the unit cache. Test isolation only.
    pub fn reset(&mut self) {
        self.cache.reset();
    }

    /// Resolve a unit by name, executing it if this is the first request.
    ///
    /// The returned handle is shared: every resolution of the same name in
    /// this process yields the same namespace, and top-level statements run
    /// only on the first one.
    pub fn resolve(&mut self, name: &UnitName) -> Result<NamespaceRef, EvalError> {
        self.load_unit(name, false)
    }

    /// Load and execute `name` as the process entry point.
    ///
    /// Identical to [`Loader::resolve`] except the entry flag for this one
    /// execution is true, which is exactly what `is_entry()` reports inside
    /// the unit. The loader gives the entry unit no other distinction: it is
    /// cached under its own name like any other unit.
    pub fn invoke_entry(&mut self, name: &UnitName) -> Result<ExitStatus, EvalError> {
        self.load_unit(name, true)?;
        Ok(ExitStatus::SUCCESS)
    }

    /// Call a function value from the host.
    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
        self.call_host(callee, args)
    }

    fn load_unit(&mut self, name: &UnitName, entry: bool) -> Result<NamespaceRef, EvalError> {
        if let Some(record) = self.cache.get(name) {
            tracing::debug!(
                name = %name.display(&self.interner),
                "unit cache hit"
            );
            return Ok(record.namespace.clone());
        }

        // Groups containing the unit load first: `grouped.math` executes
        // `grouped` before `math`, each cached under its own prefix name.
        for prefix in name.prefixes() {
            if !self.cache.contains(&prefix) {
                self.load_unit(&prefix, false)?;
            }
        }

        let display_name = name.display(&self.interner);
        let resolved = self
            .search_path
            .resolve(name, &self.interner)
            .map_err(|e| errors::unit_not_found(&e))?;

        let source = fs::read_to_string(&resolved.path)
            .map_err(|e| errors::load_failed(&display_name, &e))?;
        let tokens = lode_lexer::lex(&source, &self.interner)
            .map_err(|e| errors::load_failed(&display_name, &e))?;
        let unit = lode_parse::parse(&tokens, &self.interner)
            .map_err(|e| errors::load_failed(&display_name, &e))?;

        tracing::debug!(name = %display_name, entry, "executing unit top-level");

        // Cache before execute: a circular import re-entering this name
        // observes the partially populated namespace instead of recursing.
        let namespace = NamespaceRef::new(name.clone(), entry);
        self.cache.insert(UnitRecord {
            name: name.clone(),
            path: resolved.path,
            namespace: namespace.clone(),
        });

        let mut env = Env::module(namespace.clone());
        self.exec_unit(&unit, &mut env)?;

        Ok(namespace)
    }
}

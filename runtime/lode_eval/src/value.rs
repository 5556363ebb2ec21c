//! Runtime values.

use std::rc::Rc;

use lode_ir::{FnDecl, Interner};

use crate::builtins::Builtin;
use crate::namespace::NamespaceRef;

/// A runtime value.
///
/// Strings are reference-counted; functions share their declaration with the
/// AST and carry the namespace of the unit that defined them, so free names
/// in their bodies resolve against their home unit — not the caller's.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Str(Rc<str>),
    Bool(bool),
    /// The result of statements and calls that produce nothing.
    Unit,
    Function(FunctionValue),
    Builtin(Builtin),
    /// An imported unit's namespace, bound by a `use` statement.
    Namespace(NamespaceRef),
}

/// A user-defined function: shared declaration plus defining namespace.
#[derive(Clone)]
pub struct FunctionValue {
    pub decl: Rc<FnDecl>,
    /// Namespace of the unit whose top-level execution defined this
    /// function.
    pub home: NamespaceRef,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Unit => "unit",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Namespace(_) => "namespace",
        }
    }

    /// Render for `print` and error messages. Strings render bare, without
    /// quotes.
    pub fn display(&self, interner: &Interner) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Unit => "()".to_string(),
            Value::Function(f) => format!("<fn {}>", interner.lookup(f.decl.name)),
            Value::Builtin(b) => format!("<builtin {}>", b.name()),
            Value::Namespace(ns) => format!("<unit {}>", ns.unit_name().display(interner)),
        }
    }

    /// Equality between values of the same type. `None` when the operands
    /// are of different types — the evaluator turns that into a type error
    /// rather than answering `false`.
    pub fn try_eq(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => Some(l == r),
            (Value::Str(l), Value::Str(r)) => Some(l == r),
            (Value::Bool(l), Value::Bool(r)) => Some(l == r),
            (Value::Unit, Value::Unit) => Some(true),
            (Value::Function(l), Value::Function(r)) => {
                Some(Rc::ptr_eq(&l.decl, &r.decl) && l.home.same(&r.home))
            }
            (Value::Builtin(l), Value::Builtin(r)) => Some(l == r),
            (Value::Namespace(l), Value::Namespace(r)) => Some(l.same(r)),
            _ => None,
        }
    }
}

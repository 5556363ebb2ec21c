//! Tree-walking execution of unit statements and expressions.
//!
//! Execution is a set of methods on [`Loader`] because a `use` statement
//! re-enters the loader mid-execution: imports are resolved at the moment
//! the statement runs, in statement order.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use lode_ir::{BinaryOp, Block, Expr, ExprKind, Name, Span, Stmt, StmtKind, UnaryOp, Unit};
use lode_stack::ensure_sufficient_stack;

use crate::builtins::Builtin;
use crate::errors::{self, EvalError};
use crate::loader::Loader;
use crate::namespace::NamespaceRef;
use crate::value::{FunctionValue, Value};

/// Where names defined by the executing code land.
///
/// Module-level execution binds into the unit's namespace; a function call
/// gets a frame of locals in front of its home namespace. Blocks do not
/// introduce scopes — a `let` inside `if` is function-local (or
/// module-level), like the rest of the binding model.
pub(crate) struct Env {
    ns: NamespaceRef,
    locals: Option<FxHashMap<Name, Value>>,
}

impl Env {
    /// Environment for a unit's top-level statements.
    pub fn module(ns: NamespaceRef) -> Self {
        Env { ns, locals: None }
    }

    /// Environment for one function call frame.
    pub fn frame(home: NamespaceRef) -> Self {
        Env {
            ns: home,
            locals: Some(FxHashMap::default()),
        }
    }

    pub fn ns(&self) -> &NamespaceRef {
        &self.ns
    }

    fn define(&mut self, name: Name, value: Value) {
        match &mut self.locals {
            Some(locals) => {
                locals.insert(name, value);
            }
            None => self.ns.define(name, value),
        }
    }

    fn get(&self, name: Name) -> Option<Value> {
        if let Some(locals) = &self.locals {
            if let Some(value) = locals.get(&name) {
                return Some(value.clone());
            }
        }
        self.ns.get(name)
    }
}

/// Statement outcome: fall through, or unwind to the enclosing call.
pub(crate) enum Flow {
    Normal,
    Return(Value),
}

impl Loader {
    /// Execute a unit's top-level statements in order.
    pub(crate) fn exec_unit(&mut self, unit: &Unit, env: &mut Env) -> Result<(), EvalError> {
        for stmt in &unit.stmts {
            match self.exec_stmt(stmt, env)? {
                Flow::Normal => {}
                Flow::Return(_) => {
                    return Err(errors::return_outside_function(stmt.span));
                }
            }
        }
        Ok(())
    }

    fn exec_block(&mut self, block: &Block, env: &mut Env) -> Result<Flow, EvalError> {
        for stmt in &block.stmts {
            match self.exec_stmt(stmt, env)? {
                Flow::Normal => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &mut Env) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Use { path, alias } => {
                let imported = self.resolve(path)?;
                let bind = alias.unwrap_or_else(|| path.tail());
                env.define(bind, Value::Namespace(imported));
                Ok(Flow::Normal)
            }
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.define(*name, value);
                Ok(Flow::Normal)
            }
            StmtKind::Fn(decl) => {
                let function = FunctionValue {
                    decl: decl.clone(),
                    home: env.ns().clone(),
                };
                env.define(decl.name, Value::Function(function));
                Ok(Flow::Normal)
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                let decided = self.eval_expr(cond, env)?;
                match decided {
                    Value::Bool(true) => self.exec_block(then_block, env),
                    Value::Bool(false) => match else_block {
                        Some(block) => self.exec_block(block, env),
                        None => Ok(Flow::Normal),
                    },
                    other => Err(errors::type_mismatch(
                        "bool",
                        other.type_name(),
                        cond.span,
                    )),
                }
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Unit,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::Expr(expr) => {
                self.eval_expr(expr, env)?;
                Ok(Flow::Normal)
            }
        }
    }

    pub(crate) fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Env) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Int(value) => Ok(Value::Int(*value)),
            ExprKind::Str(name) => Ok(Value::Str(Rc::from(self.interner().lookup(*name)))),
            ExprKind::Bool(value) => Ok(Value::Bool(*value)),
            ExprKind::Ident(name) => self.lookup_name(*name, env, expr.span),
            ExprKind::Field { base, member } => {
                let value = self.eval_expr(base, env)?;
                match value {
                    Value::Namespace(ns) => ns.get(*member).ok_or_else(|| {
                        errors::undefined_member(
                            &ns.unit_name().display(self.interner()),
                            self.interner().lookup(*member),
                            expr.span,
                        )
                    }),
                    other => Err(errors::type_mismatch(
                        "namespace",
                        other.type_name(),
                        base.span,
                    )),
                }
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let mut supplied = Vec::with_capacity(args.len());
                for arg in args {
                    supplied.push(self.eval_expr(arg, env)?);
                }
                let caller_ns = env.ns().clone();
                self.call_value(callee, supplied, expr.span, &caller_ns)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                match (op, value) {
                    (UnaryOp::Neg, Value::Int(v)) => v
                        .checked_neg()
                        .map(Value::Int)
                        .ok_or_else(|| errors::integer_overflow("-", expr.span)),
                    (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                    (UnaryOp::Neg, other) => Err(errors::type_mismatch(
                        "int",
                        other.type_name(),
                        operand.span,
                    )),
                    (UnaryOp::Not, other) => Err(errors::type_mismatch(
                        "bool",
                        other.type_name(),
                        operand.span,
                    )),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => match op {
                BinaryOp::And | BinaryOp::Or => self.eval_logical(*op, lhs, rhs, env),
                _ => self.eval_binary(*op, lhs, rhs, env, expr.span),
            },
        }
    }

    fn lookup_name(&self, name: Name, env: &Env, span: Span) -> Result<Value, EvalError> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = self.builtins.get(name) {
            return Ok(Value::Builtin(builtin));
        }
        Err(errors::undefined_name(self.interner().lookup(name), span))
    }

    /// `&&` and `||`: strict bools, right operand evaluated only if needed.
    fn eval_logical(
        &mut self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        env: &Env,
    ) -> Result<Value, EvalError> {
        let left = self.eval_expr(lhs, env)?;
        let Value::Bool(left) = left else {
            return Err(errors::type_mismatch("bool", left.type_name(), lhs.span));
        };

        match (op, left) {
            (BinaryOp::And, false) => return Ok(Value::Bool(false)),
            (BinaryOp::Or, true) => return Ok(Value::Bool(true)),
            _ => {}
        }

        let right = self.eval_expr(rhs, env)?;
        let Value::Bool(right) = right else {
            return Err(errors::type_mismatch("bool", right.type_name(), rhs.span));
        };
        Ok(Value::Bool(right))
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        env: &Env,
        span: Span,
    ) -> Result<Value, EvalError> {
        let left = self.eval_expr(lhs, env)?;
        let right = self.eval_expr(rhs, env)?;

        let mismatch =
            || errors::binary_type_mismatch(op.symbol(), left.type_name(), right.type_name(), span);

        match op {
            BinaryOp::Add => match (&left, &right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_add(*r)
                    .map(Value::Int)
                    .ok_or_else(|| errors::integer_overflow("+", span)),
                (Value::Str(l), Value::Str(r)) => Ok(Value::Str(Rc::from(format!("{l}{r}")))),
                _ => Err(mismatch()),
            },
            BinaryOp::Sub => match (&left, &right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_sub(*r)
                    .map(Value::Int)
                    .ok_or_else(|| errors::integer_overflow("-", span)),
                _ => Err(mismatch()),
            },
            BinaryOp::Mul => match (&left, &right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_mul(*r)
                    .map(Value::Int)
                    .ok_or_else(|| errors::integer_overflow("*", span)),
                _ => Err(mismatch()),
            },
            BinaryOp::Div => match (&left, &right) {
                (Value::Int(_), Value::Int(0)) => Err(errors::division_by_zero(span)),
                (Value::Int(l), Value::Int(r)) => l
                    .checked_div(*r)
                    .map(Value::Int)
                    .ok_or_else(|| errors::integer_overflow("/", span)),
                _ => Err(mismatch()),
            },
            BinaryOp::Eq => left.try_eq(&right).map(Value::Bool).ok_or_else(mismatch),
            BinaryOp::Ne => left
                .try_eq(&right)
                .map(|eq| Value::Bool(!eq))
                .ok_or_else(mismatch),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                match (&left, &right) {
                    (Value::Int(l), Value::Int(r)) => {
                        let result = match op {
                            BinaryOp::Lt => l < r,
                            BinaryOp::Le => l <= r,
                            BinaryOp::Gt => l > r,
                            _ => l >= r,
                        };
                        Ok(Value::Bool(result))
                    }
                    _ => Err(mismatch()),
                }
            }
            // Handled by eval_logical.
            BinaryOp::And | BinaryOp::Or => unreachable!("logical operators short-circuit"),
        }
    }

    fn call_value(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        span: Span,
        caller_ns: &NamespaceRef,
    ) -> Result<Value, EvalError> {
        match callee {
            Value::Builtin(builtin) => self.call_builtin(builtin, args, span, caller_ns),
            Value::Function(function) => self.call_function(&function, args, span),
            other => Err(errors::not_callable(other.type_name(), span)),
        }
    }

    fn call_builtin(
        &mut self,
        builtin: Builtin,
        args: Vec<Value>,
        span: Span,
        caller_ns: &NamespaceRef,
    ) -> Result<Value, EvalError> {
        match builtin {
            Builtin::Print => {
                if args.len() != 1 {
                    return Err(errors::arity_mismatch(builtin.name(), 1, args.len(), span));
                }
                let line = args[0].display(self.interner());
                self.printer().println(&line);
                Ok(Value::Unit)
            }
            Builtin::IsEntry => {
                if !args.is_empty() {
                    return Err(errors::arity_mismatch(builtin.name(), 0, args.len(), span));
                }
                // Lexical: reports the flag of the unit whose code contains
                // the call, which is the namespace the environment executes
                // against.
                Ok(Value::Bool(caller_ns.is_entry()))
            }
        }
    }

    fn call_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
        span: Span,
    ) -> Result<Value, EvalError> {
        let decl = &function.decl;
        let name = self.interner().lookup(decl.name).to_string();
        let supplied = args.len();

        if supplied > decl.params.len() {
            return Err(errors::arity_mismatch(
                &name,
                decl.params.len(),
                supplied,
                span,
            ));
        }

        // Positional arguments bind left to right; unbound parameters take
        // their default, evaluated at call time in the function's home unit.
        let mut frame = Env::frame(function.home.clone());
        let mut args = args.into_iter();
        let home_env = Env::module(function.home.clone());

        for param in &decl.params {
            let value = match args.next() {
                Some(value) => value,
                None => match &param.default {
                    Some(default) => self.eval_expr(default, &home_env)?,
                    None => {
                        let required =
                            decl.params.iter().filter(|p| p.default.is_none()).count();
                        return Err(errors::arity_mismatch(&name, required, supplied, span));
                    }
                },
            };
            frame.define(param.name, value);
        }

        match self.exec_block(&decl.body, &mut frame)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Unit),
        }
    }

    /// Host-side call entry: only user-defined functions make sense without
    /// an executing unit context.
    pub(crate) fn call_host(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        match callee {
            Value::Function(function) => {
                let function = function.clone();
                self.call_function(&function, args, Span::DUMMY)
            }
            other => Err(errors::not_callable(other.type_name(), Span::DUMMY)),
        }
    }
}

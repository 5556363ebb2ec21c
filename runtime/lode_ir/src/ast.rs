//! AST for a unit's top-level statements.
//!
//! A [`Unit`] is exactly what the loader executes: an ordered list of
//! statements, some of which define names (functions, `let` bindings) and
//! some of which run for effect (calls, conditionals). Function declarations
//! are reference-counted so function values can share their bodies with the
//! AST without cloning.

use std::rc::Rc;

use super::{Name, Span, UnitName};

/// A parsed source unit: ordered top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Unit {
    pub stmts: Vec<Stmt>,
}

/// A statement with its source span.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `use grouped.math` / `use grouped.math as gm`
    Use {
        path: UnitName,
        alias: Option<Name>,
    },
    /// `let greeting = "Hello"`
    Let { name: Name, value: Expr },
    /// `fn greet(greeting = "Hello") { ... }`
    Fn(Rc<FnDecl>),
    /// `if is_entry() { main() } else { ... }`
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `return expr` — only meaningful inside a function body.
    Return(Option<Expr>),
    /// A bare expression evaluated for effect.
    Expr(Expr),
}

/// A function declaration. Shared between the AST and function values.
#[derive(Debug)]
pub struct FnDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub body: Block,
    pub span: Span,
}

/// A parameter, optionally carrying a default value expression.
#[derive(Debug)]
pub struct Param {
    pub name: Name,
    pub default: Option<Expr>,
}

/// A `{ ... }` statement block.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// An expression with its source span.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Int(i64),
    /// String literal; the interned name holds the cooked (unescaped) text.
    Str(Name),
    Bool(bool),
    Ident(Name),
    /// `namespace.member`
    Field { base: Box<Expr>, member: Name },
    /// `callee(arg, ...)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Operator text for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

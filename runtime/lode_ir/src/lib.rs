//! Shared data types for the lode runtime.
//!
//! Everything that flows between the lexer, parser, resolver and loader lives
//! here: interned [`Name`]s, source [`Span`]s, [`Token`]s, dotted
//! [`UnitName`]s, and the AST for a unit's top-level statements.

mod ast;
mod interner;
mod name;
mod span;
mod token;
mod unit_name;

pub use ast::{
    BinaryOp, Block, Expr, ExprKind, FnDecl, Param, Stmt, StmtKind, UnaryOp, Unit,
};
pub use interner::{Interner, SharedInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use unit_name::{InvalidUnitName, UnitName};

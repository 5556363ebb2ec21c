//! Statement grammar.

mod expr;

use std::rc::Rc;

use lode_ir::{Block, FnDecl, Param, Stmt, StmtKind, TokenKind, Unit, UnitName};

use crate::error::ParseError;
use crate::Parser;

impl Parser<'_> {
    /// Parse the whole token stream as a unit.
    pub fn parse_unit(mut self) -> Result<Unit, ParseError> {
        let stmts = self.parse_stmt_list(false)?;
        Ok(Unit { stmts })
    }

    /// Parse newline-separated statements until end of input (`in_block`
    /// false) or a closing brace (`in_block` true, brace not consumed).
    fn parse_stmt_list(&mut self, in_block: bool) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        self.cursor.skip_newlines();

        loop {
            if in_block && self.cursor.check(TokenKind::RBrace) {
                break;
            }
            if self.cursor.is_at_end() {
                if in_block {
                    return Err(ParseError::expected(
                        "`}`",
                        TokenKind::Eof,
                        "to close block",
                        self.cursor.current_span(),
                    ));
                }
                break;
            }

            stmts.push(self.parse_stmt()?);

            if self.cursor.check(TokenKind::Newline) {
                self.cursor.skip_newlines();
            } else if !self.cursor.is_at_end() && !self.cursor.check(TokenKind::RBrace) {
                return Err(ParseError::missing_separator(
                    self.cursor.current_kind(),
                    self.cursor.current_span(),
                ));
            }
        }

        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Use => self.parse_use(),
            TokenKind::Let => self.parse_let(),
            TokenKind::Fn => self.parse_fn(),
            TokenKind::If => self.parse_if(),
            TokenKind::Return => self.parse_return(),
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                Ok(Stmt {
                    kind: StmtKind::Expr(expr),
                    span,
                })
            }
        }
    }

    /// `use a.b.c` / `use a.b.c as alias`
    fn parse_use(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(TokenKind::Use, "to begin import")?;

        let (head, _) = self.cursor.expect_ident("after `use`")?;
        let mut segments = vec![head];
        while self.cursor.eat(TokenKind::Dot) {
            let (segment, _) = self.cursor.expect_ident("after `.` in unit name")?;
            segments.push(segment);
        }

        let alias = if self.cursor.eat(TokenKind::As) {
            let (alias, _) = self.cursor.expect_ident("after `as`")?;
            Some(alias)
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::Use {
                path: UnitName::from_segments(segments),
                alias,
            },
            span: start.to(self.cursor.previous_span()),
        })
    }

    /// `let name = expr`
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(TokenKind::Let, "to begin binding")?;
        let (name, _) = self.cursor.expect_ident("after `let`")?;
        self.cursor.expect(TokenKind::Assign, "after binding name")?;
        let value = self.parse_expr()?;
        let span = start.to(value.span);
        Ok(Stmt {
            kind: StmtKind::Let { name, value },
            span,
        })
    }

    /// `fn name(param, param = default) { ... }`
    fn parse_fn(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(TokenKind::Fn, "to begin function")?;
        let (name, _) = self.cursor.expect_ident("after `fn`")?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        let span = start.to(self.cursor.previous_span());

        Ok(Stmt {
            kind: StmtKind::Fn(Rc::new(FnDecl {
                name,
                params,
                body,
                span,
            })),
            span,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.cursor.expect(TokenKind::LParen, "after function name")?;
        self.cursor.skip_newlines();

        let mut params = Vec::new();
        let mut seen_default = false;

        if !self.cursor.check(TokenKind::RParen) {
            loop {
                let (name, name_span) = self.cursor.expect_ident("in parameter list")?;
                let default = if self.cursor.eat(TokenKind::Assign) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };

                // Required parameters may not follow defaulted ones:
                // positional arguments bind left to right.
                if default.is_some() {
                    seen_default = true;
                } else if seen_default {
                    let text = self.interner.lookup(name);
                    return Err(ParseError::required_after_default(text, name_span));
                }

                params.push(Param { name, default });

                if self.cursor.eat(TokenKind::Comma) {
                    self.cursor.skip_newlines();
                    if self.cursor.check(TokenKind::RParen) {
                        break;
                    }
                } else {
                    break;
                }
            }
        }

        self.cursor.skip_newlines();
        self.cursor.expect(TokenKind::RParen, "to close parameter list")?;
        Ok(params)
    }

    /// `if cond { ... }` with optional `else { ... }` / `else if ...`.
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(TokenKind::If, "to begin conditional")?;
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let else_block = if self.cursor.eat(TokenKind::Else) {
            if self.cursor.check(TokenKind::If) {
                // `else if` nests as an else block holding one conditional.
                let nested = self.parse_if()?;
                Some(Block {
                    stmts: vec![nested],
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_block,
                else_block,
            },
            span: start.to(self.cursor.previous_span()),
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(TokenKind::Return, "to begin return")?;

        let value = match self.cursor.current_kind() {
            TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expr()?),
        };

        Ok(Stmt {
            kind: StmtKind::Return(value),
            span: start.to(self.cursor.previous_span()),
        })
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.cursor.expect(TokenKind::LBrace, "to open block")?;
        let stmts = self.parse_stmt_list(true)?;
        self.cursor.expect(TokenKind::RBrace, "to close block")?;
        Ok(Block { stmts })
    }
}

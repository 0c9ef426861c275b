//! Parser implementation
//!
//! Hand-written recursive descent over the lexed token stream. A fixed
//! lookahead of five tokens separates the three assignment forms from a
//! `Glyn(name)` read in expression position; nothing backtracks.

use crate::ast::{BinOp, Expr, Program, Span, Spanned, Stmt};
use crate::error::{CheeseError, Result};
use crate::lexer::Token;


/// Parse tokens into AST
pub fn parse(tokens: Vec<(Token, Span)>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<(Token, Span)>) -> Self {
        Parser { tokens, pos: 0 }
    }

    // ---- token stream helpers ----

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| *s)
            .unwrap_or_else(|| self.eof_span())
    }

    /// Span of the most recently consumed token
    fn prev_span(&self) -> Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|(_, s)| *s)
            .unwrap_or_else(|| self.eof_span())
    }

    fn eof_span(&self) -> Span {
        let end = self.tokens.last().map(|(_, s)| s.end).unwrap_or(0);
        Span::new(end, end + 1)
    }

    /// Consume the current token. Callers must have peeked first.
    fn advance(&mut self) -> (Token, Span) {
        let entry = self.tokens[self.pos].clone();
        self.pos += 1;
        entry
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<Span> {
        match self.peek() {
            Some(tok) if *tok == expected => Ok(self.advance().1),
            Some(tok) => Err(CheeseError::parser(
                format!("expected `{expected}`, found `{tok}`"),
                self.peek_span(),
            )),
            None => Err(CheeseError::parser(
                format!("expected `{expected}`, found end of input"),
                self.eof_span(),
            )),
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Span)> {
        match self.peek() {
            Some(Token::Ident(_)) => {
                let (tok, span) = self.advance();
                let Token::Ident(name) = tok else {
                    unreachable!()
                };
                Ok((name, span))
            }
            Some(tok) => Err(CheeseError::parser(
                format!("expected a variable name, found `{tok}`"),
                self.peek_span(),
            )),
            None => Err(CheeseError::parser(
                "expected a variable name, found end of input",
                self.eof_span(),
            )),
        }
    }

    // ---- grammar ----

    fn parse_program(&mut self) -> Result<Program> {
        self.expect(Token::Cheese)?;
        let stmts = self.parse_stmts()?;
        self.expect(Token::NoCheese)?;

        if let Some(tok) = self.peek() {
            return Err(CheeseError::parser(
                format!("unexpected `{tok}` after `NoCheese`"),
                self.peek_span(),
            ));
        }
        Ok(Program { stmts })
    }

    /// Parse statements up to a block-closing token (`NoCheese`,
    /// `Coleraine`, `White`, or end of input). Terminators are no-op
    /// statements and are dropped here, so they never reach the
    /// evaluator.
    fn parse_stmts(&mut self) -> Result<Vec<Spanned<Stmt>>> {
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                None | Some(Token::NoCheese | Token::Coleraine | Token::White) => break,
                Some(Token::Semi) => {
                    self.pos += 1;
                }
                Some(_) => stmts.push(self.parse_stmt()?),
            }
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Spanned<Stmt>> {
        match self.peek() {
            Some(Token::Glyn) if self.at_assignment() => self.parse_assignment(),
            Some(Token::Wensleydale) => self.parse_print(),
            Some(Token::Stilton) => self.parse_if(),
            Some(Token::Cheddar) => self.parse_loop(),
            Some(Token::Belgian) => {
                let (_, span) = self.advance();
                Ok(Spanned::new(Stmt::Belgian, span))
            }
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                Ok(Spanned::new(Stmt::Expr(expr), span))
            }
        }
    }

    /// True when the upcoming `Glyn` opens one of the assignment forms:
    /// `Glyn(name, ...` (comma form), `Glyn(name) = ...` (equals form),
    /// or `Glyn(name) Cheddar ...` (bracketing form). Everything else is
    /// a variable read.
    fn at_assignment(&self) -> bool {
        if !matches!(self.peek_at(1), Some(Token::LParen)) {
            return false;
        }
        if !matches!(self.peek_at(2), Some(Token::Ident(_))) {
            return false;
        }
        match self.peek_at(3) {
            Some(Token::Comma) => true,
            Some(Token::RParen) => matches!(self.peek_at(4), Some(Token::Eq | Token::Cheddar)),
            _ => false,
        }
    }

    fn parse_assignment(&mut self) -> Result<Spanned<Stmt>> {
        let (_, start) = self.advance(); // Glyn
        self.expect(Token::LParen)?;
        let (name, _) = self.expect_ident()?;

        if self.eat(&Token::Comma) {
            // Glyn(name, expr)
            let value = self.parse_expr()?;
            let end = self.expect(Token::RParen)?;
            return Ok(Spanned::new(
                Stmt::Assign { name, value },
                start.merge(end),
            ));
        }

        self.expect(Token::RParen)?;
        if self.eat(&Token::Eq) {
            // Glyn(name) = expr
            let value = self.parse_expr()?;
            let span = start.merge(value.span);
            Ok(Spanned::new(Stmt::Assign { name, value }, span))
        } else {
            // Glyn(name) Cheddar expr Coleraine
            self.expect(Token::Cheddar)?;
            let value = self.parse_expr()?;
            let end = self.expect(Token::Coleraine)?;
            Ok(Spanned::new(
                Stmt::Assign { name, value },
                start.merge(end),
            ))
        }
    }

    fn parse_print(&mut self) -> Result<Spanned<Stmt>> {
        let (_, start) = self.advance(); // Wensleydale
        self.expect(Token::LParen)?;
        let expr = self.parse_expr()?;
        let end = self.expect(Token::RParen)?;
        Ok(Spanned::new(Stmt::Print(expr), start.merge(end)))
    }

    /// `Stilton cond Blue then... [White else...]`
    ///
    /// The branches are two separately delimited statement lists; a
    /// `White` binds to the nearest open `Stilton`.
    fn parse_if(&mut self) -> Result<Spanned<Stmt>> {
        let (_, start) = self.advance(); // Stilton
        let cond = self.parse_expr()?;
        self.expect(Token::Blue)?;
        let then_branch = self.parse_stmts()?;
        let else_branch = if self.eat(&Token::White) {
            self.parse_stmts()?
        } else {
            Vec::new()
        };
        let span = start.merge(self.prev_span());
        Ok(Spanned::new(
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// `Cheddar body... Coleraine cond` — the condition is written after
    /// the closing keyword.
    fn parse_loop(&mut self) -> Result<Spanned<Stmt>> {
        let (_, start) = self.advance(); // Cheddar
        let body = self.parse_stmts()?;
        self.expect(Token::Coleraine)?;
        let cond = self.parse_expr()?;
        let span = start.merge(cond.span);
        Ok(Spanned::new(Stmt::Loop { body, cond }, span))
    }

    // ---- expressions, loosest to tightest ----

    fn parse_expr(&mut self) -> Result<Spanned<Expr>> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.peek().and_then(comparison_op) {
            self.pos += 1;
            let right = self.parse_additive()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Spanned<Expr>> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.peek().and_then(additive_op) {
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Spanned<Expr>> {
        let mut left = self.parse_atom()?;
        while let Some(op) = self.peek().and_then(multiplicative_op) {
            self.pos += 1;
            let right = self.parse_atom()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_atom(&mut self) -> Result<Spanned<Expr>> {
        match self.peek() {
            Some(Token::Number(_)) => {
                let (tok, span) = self.advance();
                let Token::Number(value) = tok else {
                    unreachable!()
                };
                Ok(Spanned::new(Expr::Number(value), span))
            }
            Some(Token::Str(_)) => {
                let (tok, span) = self.advance();
                let Token::Str(value) = tok else {
                    unreachable!()
                };
                Ok(Spanned::new(Expr::Str(value), span))
            }
            Some(Token::Glyn) => {
                let (_, start) = self.advance();
                self.expect(Token::LParen)?;
                let (name, _) = self.expect_ident()?;
                let end = self.expect(Token::RParen)?;
                Ok(Spanned::new(Expr::Var(name), start.merge(end)))
            }
            Some(Token::Ident(_)) => {
                let (tok, span) = self.advance();
                let Token::Ident(name) = tok else {
                    unreachable!()
                };
                Ok(Spanned::new(Expr::Var(name), span))
            }
            Some(Token::LParen) => {
                let (_, start) = self.advance();
                let inner = self.parse_expr()?;
                let end = self.expect(Token::RParen)?;
                Ok(Spanned::new(inner.node, start.merge(end)))
            }
            Some(tok) => Err(CheeseError::parser(
                format!("expected an expression, found `{tok}`"),
                self.peek_span(),
            )),
            None => Err(CheeseError::parser(
                "expected an expression, found end of input",
                self.eof_span(),
            )),
        }
    }
}

fn binary(left: Spanned<Expr>, op: BinOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}

fn comparison_op(token: &Token) -> Option<BinOp> {
    match token {
        Token::EqEq => Some(BinOp::Eq),
        Token::NotEq => Some(BinOp::Ne),
        Token::Lt => Some(BinOp::Lt),
        Token::Gt => Some(BinOp::Gt),
        Token::LtEq => Some(BinOp::Le),
        Token::GtEq => Some(BinOp::Ge),
        _ => None,
    }
}

fn additive_op(token: &Token) -> Option<BinOp> {
    match token {
        Token::Plus => Some(BinOp::Add),
        Token::Minus => Some(BinOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(token: &Token) -> Option<BinOp> {
    match token {
        Token::Star => Some(BinOp::Mul),
        Token::Slash => Some(BinOp::Div),
        _ => None,
    }
}

//! Abstract Syntax Tree definitions

mod expr;
mod span;

pub use expr::*;
pub use span::*;

use serde::{Deserialize, Serialize};

/// A program is the statement sequence between `Cheese` and `NoCheese`.
///
/// Stray terminators (`;` / `Brie`) are filtered out during parsing, so
/// every entry here is a real statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub stmts: Vec<Spanned<Stmt>>,
}

/// Top-level statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Variable assignment. All three surface forms (`Glyn(x) = e;`,
    /// `Glyn(x, e)`, `Glyn(x) Cheddar e Coleraine`) parse to this.
    Assign {
        name: String,
        value: Spanned<Expr>,
    },

    /// Print statement: `Wensleydale(expr)`
    Print(Spanned<Expr>),

    /// Conditional: `Stilton cond Blue then... [White else...]`
    If {
        cond: Spanned<Expr>,
        then_branch: Vec<Spanned<Stmt>>,
        else_branch: Vec<Spanned<Stmt>>,
    },

    /// Loop-until: `Cheddar body... Coleraine cond` — the body repeats
    /// while the trailing condition is false.
    Loop {
        body: Vec<Spanned<Stmt>>,
        cond: Spanned<Expr>,
    },

    /// Debug echo: `Belgian` reprints the source of the current run
    Belgian,

    /// Bare expression statement
    Expr(Spanned<Expr>),
}

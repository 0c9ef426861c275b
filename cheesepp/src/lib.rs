//! Cheese++ Interpreter Library
//!
//! A cheese-themed toy language: source text is lexed, parsed into an
//! AST, and evaluated by a tree-walking runtime with a single flat
//! variable environment.

pub mod ast;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

pub use ast::Span;
pub use error::{CheeseError, Result};

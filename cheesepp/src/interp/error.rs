//! Runtime errors for the interpreter

use std::fmt;

/// Runtime error during evaluation. Aborts the current `run`; output
/// already written is not rolled back.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Binary operator applied to incompatible operand kinds
    TypeError,
    /// Output sink write failure
    Io,
}

impl RuntimeError {
    /// Operator applied to operands it does not support, e.g. a
    /// number compared against a string
    pub fn invalid_operands(op: impl fmt::Display, left: &str, right: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::TypeError,
            message: format!("cannot apply `{op}` to {left} and {right}"),
        }
    }

    pub fn io_error(err: std::io::Error) -> Self {
        RuntimeError {
            kind: ErrorKind::Io,
            message: format!("output write failed: {err}"),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime error: {}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

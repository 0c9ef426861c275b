//! Tree-walking interpreter: values, the flat environment, and the
//! evaluator

mod env;
mod error;
mod eval;
mod value;

pub use env::Environment;
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::Interpreter;
pub use value::Value;

//! Environment for variable bindings

use super::Value;
use std::collections::HashMap;

/// Environment holding variable bindings.
///
/// Cheese++ has exactly one flat namespace per run: no nesting, no
/// shadowing. Assigning an existing name overwrites its value (and
/// possibly its type).
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Bind a name, overwriting any existing binding
    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a name. Undefined names read as `Number(0)` — the
    /// language's zero-default policy, never an error.
    pub fn lookup(&self, name: &str) -> Value {
        self.bindings
            .get(name)
            .cloned()
            .unwrap_or(Value::Number(0.0))
    }

    /// Exact binding, if any (for callers that need to distinguish
    /// "unset" from "zero")
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All bindings, for REPL display and test assertions
    pub fn bindings(&self) -> &HashMap<String, Value> {
        &self.bindings
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

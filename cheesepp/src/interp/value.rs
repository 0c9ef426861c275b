//! Runtime values for the interpreter

use std::fmt;

/// Runtime value. Immutable once produced; assignment copies.
#[derive(Debug, Clone)]
pub enum Value {
    /// Every Cheese++ number is a 64-bit float
    Number(f64),
    /// UTF-8 text
    Str(String),
    /// Result of a comparison
    Bool(bool),
}

impl Value {
    /// Truthiness: nonzero number, nonempty string, `true`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without a decimal part: `3`, not `3.0`
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.0}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_integral_number() {
        assert_eq!(format!("{}", Value::Number(42.0)), "42");
        assert_eq!(format!("{}", Value::Number(0.0)), "0");
        assert_eq!(format!("{}", Value::Number(-5.0)), "-5");
    }

    #[test]
    fn test_display_fractional_number() {
        assert_eq!(format!("{}", Value::Number(3.5)), "3.5");
        assert_eq!(format!("{}", Value::Number(0.5)), "0.5");
    }

    #[test]
    fn test_display_infinity() {
        assert_eq!(format!("{}", Value::Number(f64::INFINITY)), "inf");
        assert_eq!(format!("{}", Value::Number(f64::NEG_INFINITY)), "-inf");
    }

    #[test]
    fn test_display_string_and_bool() {
        assert_eq!(format!("{}", Value::Str("Hello".into())), "Hello");
        assert_eq!(format!("{}", Value::Bool(true)), "true");
        assert_eq!(format!("{}", Value::Bool(false)), "false");
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Number(1.0).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::Str("x".into()).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }

    #[test]
    fn test_cross_kind_never_equal() {
        assert_ne!(Value::Number(1.0), Value::Str("1".into()));
        assert_ne!(Value::Bool(true), Value::Number(1.0));
    }
}

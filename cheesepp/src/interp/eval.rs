//! Tree-walking evaluator

use super::env::Environment;
use super::error::{InterpResult, RuntimeError};
use super::value::Value;
use crate::ast::{BinOp, Expr, Program, Spanned, Stmt};
use std::cmp::Ordering;
use std::io::Write;

/// The interpreter.
///
/// Owns one flat environment, the source text of the current run (for
/// `Belgian`), and the output sink that `Wensleydale`/`Belgian` write
/// to. One instance per logical session; sharing an instance across
/// threads is unsupported.
pub struct Interpreter<W: Write> {
    env: Environment,
    last_source: Option<String>,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Create an interpreter writing program output to `out`
    pub fn new(out: W) -> Self {
        Interpreter {
            env: Environment::new(),
            last_source: None,
            out,
        }
    }

    /// Current environment, for REPL display and test assertions
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Reset to a fresh session: empty environment, no stored source
    pub fn reset(&mut self) {
        self.env.clear();
        self.last_source = None;
    }

    /// Consume the interpreter and hand back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run a program.
    ///
    /// Stores `source` as the text `Belgian` echoes (replacing whatever
    /// an earlier run stored), evaluates every statement in order, and
    /// returns the value of the last one — `None` for an empty program
    /// or when the final statement produces no value (loops, `Belgian`,
    /// a conditional whose taken branch is empty).
    pub fn run(&mut self, program: &Program, source: &str) -> InterpResult<Option<Value>> {
        self.last_source = Some(source.to_string());

        let mut result = None;
        for stmt in &program.stmts {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Spanned<Stmt>) -> InterpResult<Option<Value>> {
        match &stmt.node {
            Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.define(name.clone(), value.clone());
                Ok(Some(value))
            }

            Stmt::Print(expr) => {
                let value = self.eval_expr(expr)?;
                writeln!(self.out, "{value}").map_err(RuntimeError::io_error)?;
                Ok(Some(value))
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                // Exactly one branch runs; the other is never touched
                let branch = if self.eval_expr(cond)?.is_truthy() {
                    then_branch
                } else {
                    else_branch
                };
                let mut result = None;
                for stmt in branch {
                    result = self.eval_stmt(stmt)?;
                }
                Ok(result)
            }

            Stmt::Loop { body, cond } => {
                // Loop-until: full body passes while the condition is
                // false, condition re-checked before every pass
                while !self.eval_expr(cond)?.is_truthy() {
                    for stmt in body {
                        self.eval_stmt(stmt)?;
                    }
                }
                Ok(None)
            }

            Stmt::Belgian => {
                match &self.last_source {
                    Some(source) if !source.is_empty() => {
                        writeln!(self.out, "=== Belgian Mode ===")
                            .and_then(|_| writeln!(self.out, "{source}"))
                            .map_err(RuntimeError::io_error)?;
                    }
                    _ => {
                        writeln!(self.out, "No source available.")
                            .map_err(RuntimeError::io_error)?;
                    }
                }
                Ok(None)
            }

            Stmt::Expr(expr) => Ok(Some(self.eval_expr(expr)?)),
        }
    }

    fn eval_expr(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        match &expr.node {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Var(name) => Ok(self.env.lookup(name)),
            Expr::Binary { left, op, right } => {
                // Strict, left before right
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                eval_binary(*op, left, right)
            }
        }
    }
}

/// Apply a binary operator.
///
/// Division follows IEEE 754: dividing by zero yields an infinity (or
/// NaN for `0 / 0`), never an error. Comparing values of different
/// kinds is a type error; same-kind comparison always succeeds.
fn eval_binary(op: BinOp, left: Value, right: Value) -> InterpResult<Value> {
    match op {
        BinOp::Add => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(RuntimeError::invalid_operands(
                op,
                left.type_name(),
                right.type_name(),
            )),
        },
        BinOp::Sub => numeric(op, &left, &right, |a, b| a - b),
        BinOp::Mul => numeric(op, &left, &right, |a, b| a * b),
        BinOp::Div => numeric(op, &left, &right, |a, b| a / b),

        BinOp::Eq => Ok(Value::Bool(values_equal(op, &left, &right)?)),
        BinOp::Ne => Ok(Value::Bool(!values_equal(op, &left, &right)?)),
        BinOp::Lt => compare(op, &left, &right, |ord| ord == Ordering::Less),
        BinOp::Gt => compare(op, &left, &right, |ord| ord == Ordering::Greater),
        BinOp::Le => compare(op, &left, &right, |ord| ord != Ordering::Greater),
        BinOp::Ge => compare(op, &left, &right, |ord| ord != Ordering::Less),
    }
}

fn numeric(op: BinOp, left: &Value, right: &Value, f: fn(f64, f64) -> f64) -> InterpResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(*a, *b))),
        _ => Err(RuntimeError::invalid_operands(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn values_equal(op: BinOp, left: &Value, right: &Value) -> InterpResult<bool> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => Err(RuntimeError::invalid_operands(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn compare(
    op: BinOp,
    left: &Value,
    right: &Value,
    f: fn(Ordering) -> bool,
) -> InterpResult<Value> {
    let ordering = match (left, right) {
        // NaN ordering comparisons are all false
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => {
            return Err(RuntimeError::invalid_operands(
                op,
                left.type_name(),
                right.type_name(),
            ));
        }
    };
    Ok(Value::Bool(ordering.is_some_and(f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    /// Run `source` on a fresh interpreter with captured output
    fn run(source: &str) -> (Interpreter<Vec<u8>>, Option<Value>) {
        let program = parse(tokenize(source).expect("lexes")).expect("parses");
        let mut interp = Interpreter::new(Vec::new());
        let result = interp.run(&program, source).expect("runs");
        (interp, result)
    }

    fn run_output(source: &str) -> String {
        let (interp, _) = run(source);
        String::from_utf8(interp.into_output()).unwrap()
    }

    fn run_error(source: &str) -> RuntimeError {
        let program = parse(tokenize(source).unwrap()).unwrap();
        Interpreter::new(Vec::new())
            .run(&program, source)
            .unwrap_err()
    }

    #[test]
    fn test_assignment_and_result() {
        let (interp, result) = run("Cheese\nGlyn(a) = 2 + 3;\nGlyn(b) = a * 4;\nb;\nNoCheese");
        assert_eq!(interp.env().lookup("a"), Value::Number(5.0));
        assert_eq!(interp.env().lookup("b"), Value::Number(20.0));
        assert_eq!(result, Some(Value::Number(20.0)));
    }

    #[test]
    fn test_empty_program_yields_none() {
        let (interp, result) = run("Cheese\nNoCheese");
        assert_eq!(result, None);
        assert!(interp.env().is_empty());
    }

    #[test]
    fn test_undefined_variable_defaults_to_zero() {
        let (interp, _) = run("Cheese\nGlyn(resultado) = inexistente + 5;\nNoCheese");
        assert_eq!(interp.env().lookup("resultado"), Value::Number(5.0));
    }

    #[test]
    fn test_arithmetic_precedence() {
        let (interp, _) = run(
            "Cheese\nGlyn(r1) = 2 + 3 * 4;\nGlyn(r2) = (2 + 3) * 4;\nGlyn(r3) = 10 / 2 + 3;\nNoCheese",
        );
        assert_eq!(interp.env().lookup("r1"), Value::Number(14.0));
        assert_eq!(interp.env().lookup("r2"), Value::Number(20.0));
        assert_eq!(interp.env().lookup("r3"), Value::Number(8.0));
    }

    #[test]
    fn test_string_concatenation() {
        let (interp, _) = run("Cheese\nGlyn(s) = SwissHello, Swiss + SwissWorldSwiss;\nNoCheese");
        assert_eq!(interp.env().lookup("s"), Value::Str("Hello, World".into()));
    }

    #[test]
    fn test_division_by_zero_is_infinity() {
        let (interp, _) = run("Cheese\nGlyn(r) = 10 / 0;\nNoCheese");
        assert_eq!(interp.env().lookup("r"), Value::Number(f64::INFINITY));
    }

    #[test]
    fn test_zero_divided_by_zero_is_nan() {
        let (interp, _) = run("Cheese\nGlyn(r) = 0 / 0;\nNoCheese");
        let Value::Number(n) = interp.env().lookup("r") else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn test_comparisons_yield_booleans() {
        let (interp, _) = run(
            "Cheese\nGlyn(a) = 10;\nGlyn(b) = 5;\nGlyn(gt) = a > b;\nGlyn(le) = a <= b;\nGlyn(eq) = a == 10;\nNoCheese",
        );
        assert_eq!(interp.env().lookup("gt"), Value::Bool(true));
        assert_eq!(interp.env().lookup("le"), Value::Bool(false));
        assert_eq!(interp.env().lookup("eq"), Value::Bool(true));
    }

    #[test]
    fn test_string_comparison_is_lexicographic() {
        let (interp, _) = run("Cheese\nGlyn(r) = SwissabcSwiss < SwissabdSwiss;\nNoCheese");
        assert_eq!(interp.env().lookup("r"), Value::Bool(true));
    }

    #[test]
    fn test_number_string_comparison_is_type_error() {
        let err = run_error("Cheese\nGlyn(r) = 5 == SwissfiveSwiss;\nNoCheese");
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains("number"));
        assert!(err.message.contains("string"));
        assert!(err.message.contains("=="));
    }

    #[test]
    fn test_number_string_ordering_is_type_error() {
        let err = run_error("Cheese\nGlyn(r) = 5 > SwissfiveSwiss;\nNoCheese");
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_number_plus_string_is_type_error() {
        let err = run_error("Cheese\nGlyn(r) = 5 + SwissfiveSwiss;\nNoCheese");
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains('+'));
    }

    #[test]
    fn test_error_aborts_remaining_statements() {
        let source =
            "Cheese\nWensleydale(SwissbeforeSwiss);\nGlyn(r) = 5 > SwissxSwiss;\nWensleydale(SwissafterSwiss);\nNoCheese";
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut interp = Interpreter::new(Vec::new());
        assert!(interp.run(&program, source).is_err());
        // Output written before the fault stays written
        let out = String::from_utf8(interp.into_output()).unwrap();
        assert_eq!(out, "before\n");
    }

    #[test]
    fn test_conditional_takes_one_branch() {
        let out = run_output(
            "Cheese\nGlyn(x) = 5;\nStilton Glyn(x) == 5 Blue\n    Wensleydale(Swissx is fiveSwiss);\nWhite\n    Wensleydale(Swissx is not fiveSwiss);\nNoCheese",
        );
        assert_eq!(out, "x is five\n");
    }

    #[test]
    fn test_conditional_false_takes_else() {
        let out = run_output(
            "Cheese\nGlyn(nota) = 5;\nStilton Glyn(nota) >= 7 Blue\n    Wensleydale(SwissAprovadoSwiss);\nWhite\n    Wensleydale(SwissReprovadoSwiss);\nNoCheese",
        );
        assert_eq!(out, "Reprovado\n");
    }

    #[test]
    fn test_conditional_result_is_last_branch_value() {
        let (_, result) = run("Cheese\nStilton 1 Blue\n    Glyn(a) = 1;\n    Glyn(b) = 2;\nNoCheese");
        assert_eq!(result, Some(Value::Number(2.0)));
    }

    #[test]
    fn test_conditional_empty_taken_branch_yields_none() {
        let (_, result) = run("Cheese\nStilton 0 Blue\n    Glyn(a) = 1;\nNoCheese");
        assert_eq!(result, None);
    }

    #[test]
    fn test_loop_until() {
        let out = run_output(
            "Cheese\nGlyn(i) = 0;\nCheddar\n    Wensleydale(Glyn(i));\n    Glyn(i) = Glyn(i) + 1;\nColeraine Glyn(i) == 3;\nNoCheese",
        );
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn test_loop_skipped_when_condition_initially_true() {
        let out = run_output(
            "Cheese\nGlyn(i) = 3;\nCheddar\n    Wensleydale(Glyn(i));\nColeraine Glyn(i) == 3;\nNoCheese",
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_print_representations() {
        let out = run_output(
            "Cheese\nWensleydale(8);\nWensleydale(2.5);\nWensleydale(SwisstextSwiss);\nWensleydale(5 greater 3);\nNoCheese",
        );
        assert_eq!(out, "8\n2.5\ntext\ntrue\n");
    }

    #[test]
    fn test_belgian_echoes_source() {
        let source = "Cheese\nGlyn(x) = 10;\nBelgian;\nNoCheese";
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut interp = Interpreter::new(Vec::new());
        interp.run(&program, source).unwrap();
        let out = String::from_utf8(interp.into_output()).unwrap();
        assert_eq!(out, format!("=== Belgian Mode ===\n{source}\n"));
    }

    #[test]
    fn test_belgian_without_source() {
        let source = "Cheese\nBelgian;\nNoCheese";
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut interp = Interpreter::new(Vec::new());
        interp.run(&program, "").unwrap();
        let out = String::from_utf8(interp.into_output()).unwrap();
        assert_eq!(out, "No source available.\n");
    }

    #[test]
    fn test_environment_persists_across_runs() {
        let mut interp = Interpreter::new(Vec::new());

        let first = "Cheese\nGlyn(x) = 10;\nNoCheese";
        interp
            .run(&parse(tokenize(first).unwrap()).unwrap(), first)
            .unwrap();

        let second = "Cheese\nGlyn(y) = x + 1;\nNoCheese";
        interp
            .run(&parse(tokenize(second).unwrap()).unwrap(), second)
            .unwrap();

        assert_eq!(interp.env().lookup("y"), Value::Number(11.0));
    }

    #[test]
    fn test_reset() {
        let mut interp = Interpreter::new(Vec::new());
        let source = "Cheese\nGlyn(x) = 10;\nNoCheese";
        interp
            .run(&parse(tokenize(source).unwrap()).unwrap(), source)
            .unwrap();
        interp.reset();
        assert!(interp.env().is_empty());
    }

    #[test]
    fn test_eval_binary_boolean_ordering() {
        // false < true, and same-kind comparison never fails
        let result = eval_binary(BinOp::Lt, Value::Bool(false), Value::Bool(true)).unwrap();
        assert_eq!(result, Value::Bool(true));
        let result = eval_binary(BinOp::Ge, Value::Bool(false), Value::Bool(true)).unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn test_eval_binary_nan_comparisons_false() {
        let nan = Value::Number(f64::NAN);
        let one = Value::Number(1.0);
        for op in [BinOp::Lt, BinOp::Gt, BinOp::Le, BinOp::Ge] {
            assert_eq!(
                eval_binary(op, nan.clone(), one.clone()).unwrap(),
                Value::Bool(false)
            );
        }
        assert_eq!(
            eval_binary(BinOp::Eq, nan.clone(), nan.clone()).unwrap(),
            Value::Bool(false)
        );
    }
}

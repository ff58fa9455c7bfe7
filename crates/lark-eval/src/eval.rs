//! Expression evaluation.

use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use lark_syntax::{BinOp, Expr};
use thiserror::Error;

use crate::value::Closure;
use crate::{Environment, Value};

/// Evaluation errors.
///
/// Every failure surfaces to the caller of [`evaluate`] as one of
/// these variants; nothing is caught or recovered inside the
/// evaluator.
#[derive(Debug, Error)]
pub enum EvalError {
    /// An operation received values of the wrong kind: a non-integer
    /// operand to a binary operator, or a non-boolean condition.
    /// Carries every offending operand.
    #[error("type mismatch: expected {expected}, but got {}", found_list(.found))]
    TypeMismatch {
        expected: ValueKind,
        found: Vec<Value>,
    },

    /// The target of a function application is not a closure.
    #[error("not callable: {0}")]
    NotCallable(Value),

    /// Argument count differs from the declared parameter count.
    #[error("expected {expected} arguments, but got {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// `/` or `%` with a zero right operand.
    #[error("division by zero")]
    DivisionByZero,

    /// The step budget ran out (see [`Evaluator::with_fuel`]).
    #[error("evaluation budget exhausted")]
    ResourceExhausted,

    /// The print sink rejected a write.
    #[error("cannot write program output: {0}")]
    Output(#[from] io::Error),
}

/// The kind of value an operation expected, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "int"),
            ValueKind::Boolean => write!(f, "bool"),
        }
    }
}

fn found_list(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// The tree-walking evaluator.
///
/// All variable state lives in the [`Environment`] passed to
/// [`Evaluator::eval`]; the struct itself only owns the print sink
/// and an optional step budget.
pub struct Evaluator {
    out: Box<dyn Write>,
    fuel: Option<u64>,
}

impl Evaluator {
    /// Create an evaluator that prints to stdout, with no step budget.
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            fuel: None,
        }
    }

    /// Redirect `print` output to the given sink.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    /// Bound evaluation to `fuel` expression nodes. Exceeding the
    /// budget fails with [`EvalError::ResourceExhausted`]; useful for
    /// embeddings that must survive runaway `while` loops.
    pub fn with_fuel(mut self, fuel: u64) -> Self {
        self.fuel = Some(fuel);
        self
    }

    /// Evaluate an expression in the given environment.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
        self.charge()?;
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),

            Expr::Bool(b) => Ok(Value::Bool(*b)),

            Expr::Var(name) => Ok(env.resolve_var(name)),

            Expr::Print(inner) => {
                let value = self.eval(inner, env)?;
                writeln!(self.out, "{}", value)?;
                Ok(value)
            }

            Expr::Binary { op, left, right } => {
                // Strict left-to-right: both operands are evaluated
                // before the operator is applied, comparisons included.
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                eval_binary(*op, left, right)
            }

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(condition, env)? {
                    self.eval(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch, env)
                } else {
                    Ok(Value::NoValue)
                }
            }

            Expr::While { condition, body } => {
                // Iterative on purpose: recursing per iteration would
                // grow the host stack with the iteration count.
                while self.eval_condition(condition, env)? {
                    self.eval(body, env)?;
                }
                Ok(Value::NoValue)
            }

            Expr::Seq(first, second) => {
                self.eval(first, env)?;
                self.eval(second, env)
            }

            Expr::VarDecl { name, value } => {
                let value = self.eval(value, env)?;
                env.create_var(name.clone(), value.clone());
                Ok(value)
            }

            Expr::Assign { name, value } => {
                let value = self.eval(value, env)?;
                env.update_var(name, value.clone());
                Ok(value)
            }

            Expr::Function { params, body } => Ok(Value::Closure(Rc::new(Closure {
                params: params.clone(),
                body: (**body).clone(),
                env: env.clone(),
            }))),

            Expr::Call { callee, args } => {
                let callee = self.eval(callee, env)?;
                // Arguments are evaluated in the caller's environment,
                // left to right, before the callee's frame exists.
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, env)?);
                }
                self.apply(callee, values)
            }
        }
    }

    fn apply(&mut self, callee: Value, args: Vec<Value>) -> Result<Value, EvalError> {
        let closure = match callee {
            Value::Closure(closure) => closure,
            other => return Err(EvalError::NotCallable(other)),
        };
        if args.len() != closure.params.len() {
            return Err(EvalError::ArityMismatch {
                expected: closure.params.len(),
                found: args.len(),
            });
        }
        // The call frame chains to the closure's captured environment,
        // not the caller's: lexical scoping, not dynamic.
        let frame = closure.env.child();
        for (param, arg) in closure.params.iter().zip(args) {
            frame.create_var(param.clone(), arg);
        }
        self.eval(&closure.body, &frame)
    }

    fn eval_condition(&mut self, condition: &Expr, env: &Environment) -> Result<bool, EvalError> {
        let value = self.eval(condition, env)?;
        match value.as_bool() {
            Some(b) => Ok(b),
            None => Err(EvalError::TypeMismatch {
                expected: ValueKind::Boolean,
                found: vec![value],
            }),
        }
    }

    fn charge(&mut self) -> Result<(), EvalError> {
        match &mut self.fuel {
            Some(0) => Err(EvalError::ResourceExhausted),
            Some(fuel) => {
                *fuel -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_binary(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    let (Some(a), Some(b)) = (left.as_int(), right.as_int()) else {
        return Err(EvalError::TypeMismatch {
            expected: ValueKind::Integer,
            found: vec![left, right],
        });
    };
    // Arithmetic wraps on overflow, like the two's-complement integer
    // semantics of the language this dialect mimics. Wrapping also
    // covers i64::MIN / -1, the one division that overflows.
    match op {
        BinOp::Add => Ok(Value::Int(a.wrapping_add(b))),
        BinOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
        BinOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
        BinOp::Div => {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Int(a.wrapping_div(b)))
            }
        }
        BinOp::Mod => {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Int(a.wrapping_rem(b)))
            }
        }
        BinOp::Gt => Ok(Value::Bool(a > b)),
        BinOp::Ge => Ok(Value::Bool(a >= b)),
        BinOp::Lt => Ok(Value::Bool(a < b)),
        BinOp::Le => Ok(Value::Bool(a <= b)),
        BinOp::Eq => Ok(Value::Bool(a == b)),
    }
}

/// Evaluate a top-level expression against a global environment.
///
/// This is the single entry point a driver needs: it constructs a
/// default-configured [`Evaluator`] (stdout printing, no step budget)
/// and runs the program once. The driver owns `env` and may inspect
/// its bindings afterwards.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    Evaluator::new().eval(expr, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_dispatch() {
        assert_eq!(
            eval_binary(BinOp::Add, Value::Int(2), Value::Int(3)).unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            eval_binary(BinOp::Le, Value::Int(2), Value::Int(2)).unwrap(),
            Value::Bool(true)
        );
        assert!(matches!(
            eval_binary(BinOp::Div, Value::Int(1), Value::Int(0)),
            Err(EvalError::DivisionByZero)
        ));
        assert!(matches!(
            eval_binary(BinOp::Add, Value::Int(1), Value::Bool(true)),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_apply_checks_arity() {
        let env = Environment::new();
        let closure = Value::Closure(Rc::new(Closure {
            params: vec!["a".to_string(), "b".to_string()],
            body: Expr::var("a"),
            env: env.clone(),
        }));

        let mut evaluator = Evaluator::new();
        let result = evaluator.apply(closure, vec![Value::Int(1)]);
        assert!(matches!(
            result,
            Err(EvalError::ArityMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_apply_binds_positionally() {
        let env = Environment::new();
        let closure = Value::Closure(Rc::new(Closure {
            params: vec!["a".to_string(), "b".to_string()],
            body: Expr::binary(BinOp::Sub, Expr::var("a"), Expr::var("b")),
            env,
        }));

        let mut evaluator = Evaluator::new();
        let result = evaluator.apply(closure, vec![Value::Int(10), Value::Int(4)]);
        assert_eq!(result.unwrap(), Value::Int(6));
    }

    #[test]
    fn test_apply_rejects_non_closure() {
        let mut evaluator = Evaluator::new();
        let result = evaluator.apply(Value::Int(7), vec![]);
        assert!(matches!(result, Err(EvalError::NotCallable(Value::Int(7)))));
    }
}
